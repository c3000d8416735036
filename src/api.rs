//! Public API surface for the time-tracking backend.
//!
//! This file consolidates the identifier types and re-exports the DTO
//! value objects produced by the service layer. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::services::reports::DaySlice;
pub use crate::services::reports::HeatmapDay;
pub use crate::services::reports::Prediction;
pub use crate::services::reports::ProjectSlice;
pub use crate::services::reports::Report;
pub use crate::services::reports::ReportPeriod;
pub use crate::services::reports::ReportPolicy;
pub use crate::services::reports::Streak;
pub use crate::services::reports::TagSlice;
pub use crate::services::reports::Trend;

use serde::{Deserialize, Serialize};

/// Time entry identifier (UUID string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

/// Project identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Task identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

/// Goal identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GoalId(pub String);

impl EntryId {
    pub fn new(value: impl Into<String>) -> Self {
        EntryId(value.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        EntryId(uuid::Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Self {
        ProjectId(value.into())
    }

    pub fn generate() -> Self {
        ProjectId(uuid::Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        TaskId(value.into())
    }

    pub fn generate() -> Self {
        TaskId(uuid::Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl GoalId {
    pub fn new(value: impl Into<String>) -> Self {
        GoalId(value.into())
    }

    pub fn generate() -> Self {
        GoalId(uuid::Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}
impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}
impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}
impl From<GoalId> for String {
    fn from(id: GoalId) -> Self {
        id.0
    }
}
