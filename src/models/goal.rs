//! Target-hours goals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{GoalId, ProjectId};

/// Goal cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Daily,
    Weekly,
    Monthly,
}

/// Target hours over a half-open window `[start_date, end_date)`.
///
/// Progress is always derived from entries at read time (see
/// `services::goals`); it is never stored, so it cannot go stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub period: GoalPeriod,
    pub target_hours: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// When set, only entries for this project count toward the goal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}
