//! Repository implementations module.
//!
//! This module contains the implementations of the store traits:
//! - `local`: In-memory implementation for unit testing and local development
//! - `cached`: TTL read-through caching decorator over another implementation
pub mod cached;
pub mod local;

pub use cached::{CachedRepository, DEFAULT_CACHE_TTL};
pub use local::LocalRepository;
