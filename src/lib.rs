//! # Tempo Rust Backend
//!
//! Personal time-tracking core engine.
//!
//! This crate provides a Rust backend for the Tempo time-tracking system:
//! a timer/session manager enforcing the single-running-entry invariant, a
//! pure report/aggregation engine (period breakdowns, streaks, calendar
//! heatmaps, a naive prediction), goal progress tracking, and a
//! repository-pattern store. The backend exposes a REST API via Axum.
//!
//! ## Features
//!
//! - **Timer Lifecycle**: Start/stop tracking with at most one running entry
//! - **Manual Logging**: Insert and edit finished entries after the fact
//! - **Reports**: Day/week/month breakdowns by project, tag, and calendar day
//! - **Habit Signals**: Daily streaks and a GitHub-style year heatmap
//! - **Goals**: Target-hours goals with derived progress
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Typed identifiers and Data Transfer Objects
//! - [`db`]: Repository pattern, in-memory store, cache and retry layers
//! - [`services`]: Timer, report, and goal business logic
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
