//! Entry repository trait for time entry CRUD operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RepositoryResult;
use crate::api::{EntryId, ProjectId, TaskId};
use crate::models::TimeEntry;

/// Partial update for a time entry.
///
/// Only fields set to `Some` are applied. Patching never touches the
/// running flag; the timer lifecycle goes through [`super::TimerRepository`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Replacement duration in seconds; must be non-negative.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Repository trait for time entry storage.
///
/// `insert_entry` is for manually logged (already stopped) entries; running
/// entries are only ever created through `TimerRepository::begin_entry`, so
/// a conforming implementation must reject inserts with `is_running` set.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// List all entries in the store.
    async fn list_entries(&self) -> RepositoryResult<Vec<TimeEntry>>;

    /// List entries whose `start_time` falls in the inclusive window.
    async fn list_entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TimeEntry>>;

    /// Fetch a single entry. `Ok(None)` when absent.
    async fn get_entry(&self, id: &EntryId) -> RepositoryResult<Option<TimeEntry>>;

    /// Insert a manually logged entry.
    ///
    /// Fails with a validation error on unknown project/task foreign keys,
    /// negative duration, or `is_running = true`.
    async fn insert_entry(&self, entry: TimeEntry) -> RepositoryResult<TimeEntry>;

    /// Apply a partial update. `Ok(None)` when the entry does not exist.
    async fn update_entry(
        &self,
        id: &EntryId,
        patch: EntryPatch,
    ) -> RepositoryResult<Option<TimeEntry>>;

    /// Delete an entry. Returns whether something was removed.
    async fn delete_entry(&self, id: &EntryId) -> RepositoryResult<bool>;
}
