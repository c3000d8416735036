//! Timer/session lifecycle.
//!
//! The store-wide state machine is IDLE -> RUNNING -> IDLE with at most one
//! running entry. Starting is precondition-free: a running entry is stopped
//! implicitly inside the same repository operation, so the invariant never
//! has an observable gap. Stopping a non-active entry is a no-op sentinel,
//! not an error.

use chrono::{DateTime, Utc};

use crate::api::EntryId;
use crate::db::repository::{FullRepository, NewTimerEntry, RepositoryResult, StartedTimer};
use crate::models::TimeEntry;

/// Start a timer now. Any running entry is stopped first.
pub async fn start_timer(
    repo: &dyn FullRepository,
    new: NewTimerEntry,
) -> RepositoryResult<StartedTimer> {
    start_timer_at(repo, new, Utc::now()).await
}

/// Start a timer at an explicit instant (deterministic path for tests).
pub async fn start_timer_at(
    repo: &dyn FullRepository,
    new: NewTimerEntry,
    now: DateTime<Utc>,
) -> RepositoryResult<StartedTimer> {
    repo.begin_entry(new, now).await
}

/// Stop the running entry identified by `id` now.
///
/// Returns `Ok(None)` when `id` is not the active entry — including a
/// second stop of the same id, which must never rewrite the recorded
/// duration.
pub async fn stop_timer(
    repo: &dyn FullRepository,
    id: &EntryId,
) -> RepositoryResult<Option<TimeEntry>> {
    stop_timer_at(repo, id, Utc::now()).await
}

/// Stop at an explicit instant (deterministic path for tests).
pub async fn stop_timer_at(
    repo: &dyn FullRepository,
    id: &EntryId,
    now: DateTime<Utc>,
) -> RepositoryResult<Option<TimeEntry>> {
    repo.finish_entry(id, now).await
}

/// The currently running entry; absence means the store is idle.
pub async fn running_entry(repo: &dyn FullRepository) -> RepositoryResult<Option<TimeEntry>> {
    repo.running_entry().await
}

/// Live elapsed seconds for display ticking.
///
/// Pure recomputation on every call, no caching: a running entry reports
/// `floor(now - start_time)`, a stopped one its recorded duration.
pub fn current_duration(entry: &TimeEntry, now: DateTime<Utc>) -> i64 {
    entry.current_duration(now)
}
