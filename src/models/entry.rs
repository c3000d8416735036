//! Time entry model.
//!
//! A [`TimeEntry`] is one contiguous (or manually logged) span of tracked
//! work. Exactly one entry may be running at any instant; that invariant is
//! owned by the repository layer, which tracks the active entry id in the
//! same critical section as entry writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{EntryId, ProjectId, TaskId};

/// A sub-record attached to a time entry (e.g. a Pomodoro work interval).
///
/// Activities are an informational sub-ledger: their durations never feed
/// into the parent entry's `duration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    /// Activity length in seconds.
    pub duration: i64,
    pub timestamp: DateTime<Utc>,
}

/// One span of tracked work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: EntryId,
    pub project_id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    pub start_time: DateTime<Utc>,
    /// Present iff the entry is not running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Non-negative whole seconds. Authoritative once stopped; never
    /// recomputed from timestamps after that point.
    pub duration: i64,
    /// True for at most one entry across the whole store.
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<Activity>,
}

impl TimeEntry {
    /// Live duration in whole seconds at the given instant.
    ///
    /// For a running entry this is `floor(now - start_time)` recomputed on
    /// every call; for a stopped entry it is the stored `duration`,
    /// unchanged. Never negative.
    pub fn current_duration(&self, now: DateTime<Utc>) -> i64 {
        if self.is_running {
            (now - self.start_time).num_seconds().max(0)
        } else {
            self.duration
        }
    }

    /// Elapsed hours derived from the stored duration.
    pub fn hours(&self) -> f64 {
        self.duration as f64 / 3600.0
    }
}
