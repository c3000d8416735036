//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The report value objects are re-exported from the service layer since
//! they already derive Serialize/Deserialize.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Reports
    DaySlice, HeatmapDay, Prediction, ProjectSlice, Report, ReportPeriod, Streak, TagSlice, Trend,
};
pub use crate::db::repository::{EntryPatch, NewTimerEntry, StartedTimer};
pub use crate::models::{Goal, GoalPeriod, Project, Task, TimeEntry};
pub use crate::services::goals::GoalProgress;

/// Request body for stopping the running timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTimerRequest {
    /// Id of the entry the client believes is running.
    pub entry_id: String,
}

/// Response for a stop request.
///
/// `stopped` is `None` when the id did not refer to the running entry —
/// the "nothing to stop" sentinel, deliberately not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTimerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<TimeEntry>,
}

/// Current timer status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<TimeEntry>,
    /// Live elapsed seconds for the running entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<i64>,
}

/// Request body for manually logging a finished entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryRequest {
    pub project_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    pub start_time: DateTime<Utc>,
    /// Whole seconds; fixed at creation for manual entries.
    pub duration: i64,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for listing entries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EntryWindowQuery {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

/// Entry list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<TimeEntry>,
    pub total: usize,
}

/// Request body for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Project list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
    pub total: usize,
}

/// Request body for creating a task inside a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
}

/// Task list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub total: usize,
}

/// Request body for creating a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub period: GoalPeriod,
    pub target_hours: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Goal list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalListResponse {
    pub goals: Vec<Goal>,
    pub total: usize,
}

/// Query parameters for report generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    pub period: ReportPeriod,
    /// Anchor date; defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for the heatmap endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapQuery {
    pub year: i32,
}

/// Heatmap response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapResponse {
    pub year: i32,
    pub days: Vec<HeatmapDay>,
}

/// Result of a delete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub store: String,
}
