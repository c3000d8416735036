//! Timer repository trait: the single-running-entry slot.
//!
//! The store tracks the currently running entry as an explicit
//! `active_entry_id` slot updated in the same critical section as the entry
//! writes, rather than inferring it by scanning for `is_running = true`.
//! `begin_entry` and `finish_entry` are single logical operations so the
//! invariant "at most one running entry" holds at every observation point.
//! When the store is shared across processes the invariant is best-effort.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RepositoryResult;
use crate::api::{EntryId, ProjectId, TaskId};
use crate::models::TimeEntry;

/// Payload for starting a timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimerEntry {
    pub project_id: ProjectId,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Outcome of `begin_entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedTimer {
    /// The previously running entry, stopped implicitly. `None` when the
    /// store was idle.
    pub stopped: Option<TimeEntry>,
    /// The freshly created running entry.
    pub started: TimeEntry,
}

/// Repository trait for the timer slot.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TimerRepository: Send + Sync {
    /// The currently running entry, if any. Absence means the store is idle.
    async fn running_entry(&self) -> RepositoryResult<Option<TimeEntry>>;

    /// Start a new running entry at `now`.
    ///
    /// Precondition-free: any already-running entry is stopped first within
    /// the same logical operation, so the single-running invariant holds
    /// before the new entry is created. Fails with a validation error on
    /// unknown project/task foreign keys.
    async fn begin_entry(
        &self,
        new: NewTimerEntry,
        now: DateTime<Utc>,
    ) -> RepositoryResult<StartedTimer>;

    /// Stop the running entry identified by `id` at `now`.
    ///
    /// Only acts when `id` refers to the active entry; otherwise this is a
    /// no-op returning `Ok(None)` (the "nothing to stop" sentinel). On stop
    /// the entry gets `duration = floor(now - start_time)` in whole seconds,
    /// `end_time = now`, `is_running = false`; there is no partial-write
    /// state.
    async fn finish_entry(
        &self,
        id: &EntryId,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Option<TimeEntry>>;
}
