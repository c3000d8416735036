//! Project and task grouping entities.
//!
//! Projects own tasks, and both are lookup keys for time entries during
//! aggregation. Deleting a project cascades to its tasks and entries;
//! deleting a task cascades to its entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ProjectId, TaskId};

/// Top-level grouping entity for tracked work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A unit of work inside a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
