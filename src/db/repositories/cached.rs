//! Time-boxed read-through cache in front of another repository.
//!
//! Collection listings (`list_entries`, `list_projects`, `list_tasks`,
//! `list_goals`) are cached for a fixed TTL. After a successful write the
//! affected collection is refreshed optimistically in place where the new
//! state is known, and dropped otherwise. There is no invalidation protocol
//! beyond the TTL and explicit [`CachedRepository::clear_cache`] calls, so a
//! concurrent reader in another process can observe data up to `ttl` stale.
//! This is an availability/latency trade-off, not a correctness guarantee;
//! point reads and every timer operation always go to the inner store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{EntryId, GoalId, ProjectId, TaskId};
use crate::db::repository::{
    EntryPatch, EntryRepository, FullRepository, GoalRepository, HealthCheck, NewTimerEntry,
    ProjectRepository, RepositoryResult, StartedTimer, TimerRepository,
};
use crate::models::{Goal, Project, Task, TimeEntry};

/// Default cache lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

struct Slot<T> {
    value: Vec<T>,
    fetched_at: Instant,
}

impl<T: Clone> Slot<T> {
    fn fresh(value: Vec<T>) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    fn get(&self, ttl: Duration) -> Option<Vec<T>> {
        (self.fetched_at.elapsed() < ttl).then(|| self.value.clone())
    }
}

#[derive(Default)]
struct CacheState {
    entries: Option<Slot<TimeEntry>>,
    projects: Option<Slot<Project>>,
    tasks: Option<Slot<Task>>,
    goals: Option<Slot<Goal>>,
}

/// Caching decorator over any repository implementation.
pub struct CachedRepository {
    inner: Arc<dyn FullRepository>,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl CachedRepository {
    /// Wrap a repository with the default TTL.
    pub fn new(inner: Arc<dyn FullRepository>) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL)
    }

    /// Wrap a repository with an explicit TTL.
    pub fn with_ttl(inner: Arc<dyn FullRepository>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Drop every cached collection.
    pub fn clear_cache(&self) {
        *self.state.lock() = CacheState::default();
    }

    fn drop_entries(&self) {
        self.state.lock().entries = None;
    }
}

#[async_trait]
impl EntryRepository for CachedRepository {
    async fn list_entries(&self) -> RepositoryResult<Vec<TimeEntry>> {
        if let Some(cached) = self.state.lock().entries.as_ref().and_then(|s| s.get(self.ttl)) {
            return Ok(cached);
        }
        let entries = self.inner.list_entries().await?;
        self.state.lock().entries = Some(Slot::fresh(entries.clone()));
        Ok(entries)
    }

    async fn list_entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TimeEntry>> {
        // Windowed reads reuse the collection cache.
        let entries = self.list_entries().await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.start_time >= start && e.start_time <= end)
            .collect())
    }

    async fn get_entry(&self, id: &EntryId) -> RepositoryResult<Option<TimeEntry>> {
        self.inner.get_entry(id).await
    }

    async fn insert_entry(&self, entry: TimeEntry) -> RepositoryResult<TimeEntry> {
        let inserted = self.inner.insert_entry(entry).await?;
        let mut state = self.state.lock();
        if let Some(slot) = state.entries.as_mut() {
            slot.value.push(inserted.clone());
            slot.value.sort_by_key(|e| e.start_time);
        }
        Ok(inserted)
    }

    async fn update_entry(
        &self,
        id: &EntryId,
        patch: EntryPatch,
    ) -> RepositoryResult<Option<TimeEntry>> {
        let updated = self.inner.update_entry(id, patch).await?;
        if let Some(updated) = &updated {
            let mut state = self.state.lock();
            if let Some(slot) = state.entries.as_mut() {
                if let Some(cached) = slot.value.iter_mut().find(|e| e.id == *id) {
                    *cached = updated.clone();
                }
                slot.value.sort_by_key(|e| e.start_time);
            }
        }
        Ok(updated)
    }

    async fn delete_entry(&self, id: &EntryId) -> RepositoryResult<bool> {
        let removed = self.inner.delete_entry(id).await?;
        if removed {
            let mut state = self.state.lock();
            if let Some(slot) = state.entries.as_mut() {
                slot.value.retain(|e| e.id != *id);
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl TimerRepository for CachedRepository {
    async fn running_entry(&self) -> RepositoryResult<Option<TimeEntry>> {
        // The timer slot is never served stale.
        self.inner.running_entry().await
    }

    async fn begin_entry(
        &self,
        new: NewTimerEntry,
        now: DateTime<Utc>,
    ) -> RepositoryResult<StartedTimer> {
        let started = self.inner.begin_entry(new, now).await?;
        self.drop_entries();
        Ok(started)
    }

    async fn finish_entry(
        &self,
        id: &EntryId,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Option<TimeEntry>> {
        let stopped = self.inner.finish_entry(id, now).await?;
        if stopped.is_some() {
            self.drop_entries();
        }
        Ok(stopped)
    }
}

#[async_trait]
impl ProjectRepository for CachedRepository {
    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        if let Some(cached) = self.state.lock().projects.as_ref().and_then(|s| s.get(self.ttl)) {
            return Ok(cached);
        }
        let projects = self.inner.list_projects().await?;
        self.state.lock().projects = Some(Slot::fresh(projects.clone()));
        Ok(projects)
    }

    async fn get_project(&self, id: &ProjectId) -> RepositoryResult<Option<Project>> {
        self.inner.get_project(id).await
    }

    async fn insert_project(&self, project: Project) -> RepositoryResult<Project> {
        let inserted = self.inner.insert_project(project).await?;
        let mut state = self.state.lock();
        if let Some(slot) = state.projects.as_mut() {
            slot.value.push(inserted.clone());
        }
        Ok(inserted)
    }

    async fn delete_project(&self, id: &ProjectId) -> RepositoryResult<bool> {
        let removed = self.inner.delete_project(id).await?;
        if removed {
            // Cascades touch tasks and entries too.
            let mut state = self.state.lock();
            state.projects = None;
            state.tasks = None;
            state.entries = None;
        }
        Ok(removed)
    }

    async fn list_tasks(&self, project_id: Option<&ProjectId>) -> RepositoryResult<Vec<Task>> {
        if project_id.is_none() {
            if let Some(cached) = self.state.lock().tasks.as_ref().and_then(|s| s.get(self.ttl)) {
                return Ok(cached);
            }
            let tasks = self.inner.list_tasks(None).await?;
            self.state.lock().tasks = Some(Slot::fresh(tasks.clone()));
            return Ok(tasks);
        }
        self.inner.list_tasks(project_id).await
    }

    async fn insert_task(&self, task: Task) -> RepositoryResult<Task> {
        let inserted = self.inner.insert_task(task).await?;
        let mut state = self.state.lock();
        if let Some(slot) = state.tasks.as_mut() {
            slot.value.push(inserted.clone());
        }
        Ok(inserted)
    }

    async fn delete_task(&self, id: &TaskId) -> RepositoryResult<bool> {
        let removed = self.inner.delete_task(id).await?;
        if removed {
            let mut state = self.state.lock();
            state.tasks = None;
            state.entries = None;
        }
        Ok(removed)
    }
}

#[async_trait]
impl GoalRepository for CachedRepository {
    async fn list_goals(&self) -> RepositoryResult<Vec<Goal>> {
        if let Some(cached) = self.state.lock().goals.as_ref().and_then(|s| s.get(self.ttl)) {
            return Ok(cached);
        }
        let goals = self.inner.list_goals().await?;
        self.state.lock().goals = Some(Slot::fresh(goals.clone()));
        Ok(goals)
    }

    async fn get_goal(&self, id: &GoalId) -> RepositoryResult<Option<Goal>> {
        self.inner.get_goal(id).await
    }

    async fn insert_goal(&self, goal: Goal) -> RepositoryResult<Goal> {
        let inserted = self.inner.insert_goal(goal).await?;
        let mut state = self.state.lock();
        if let Some(slot) = state.goals.as_mut() {
            slot.value.push(inserted.clone());
        }
        Ok(inserted)
    }

    async fn delete_goal(&self, id: &GoalId) -> RepositoryResult<bool> {
        let removed = self.inner.delete_goal(id).await?;
        if removed {
            let mut state = self.state.lock();
            if let Some(slot) = state.goals.as_mut() {
                slot.value.retain(|g| g.id != *id);
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl HealthCheck for CachedRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.inner.health_check().await
    }
}
