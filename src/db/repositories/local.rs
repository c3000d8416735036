//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMaps, providing fast, deterministic, and isolated
//! execution.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{EntryId, GoalId, ProjectId, TaskId};
use crate::db::repository::{
    EntryPatch, EntryRepository, ErrorContext, GoalRepository, HealthCheck, NewTimerEntry,
    ProjectRepository, RepositoryError, RepositoryResult, StartedTimer, TimerRepository,
};
use crate::models::{Goal, Project, Task, TimeEntry};

/// In-memory local repository.
///
/// The timer slot (`active_entry_id`) lives next to the entry map and every
/// timer transition happens under one write lock, so the single-running
/// invariant cannot be observed mid-flight from this process.
///
/// # Example
/// ```ignore
/// let repo = LocalRepository::new();
/// repo.insert_project_impl(project);
/// let entries = repo.list_entries().await.unwrap();
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    entries: HashMap<EntryId, TimeEntry>,
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    goals: HashMap<GoalId, Goal>,

    /// Explicit single-running-timer slot; never inferred from `is_running`.
    active_entry_id: Option<EntryId>,

    /// Connection health (false simulates an unreachable store in tests).
    unhealthy: bool,
}

impl LocalData {
    fn validate_entry_refs(
        &self,
        operation: &str,
        project_id: &ProjectId,
        task_id: Option<&TaskId>,
    ) -> RepositoryResult<()> {
        if !self.projects.contains_key(project_id) {
            return Err(RepositoryError::validation_with_context(
                format!("Unknown project: {}", project_id),
                ErrorContext::new(operation)
                    .with_entity("project")
                    .with_entity_id(project_id),
            ));
        }
        if let Some(task_id) = task_id {
            match self.tasks.get(task_id) {
                None => {
                    return Err(RepositoryError::validation_with_context(
                        format!("Unknown task: {}", task_id),
                        ErrorContext::new(operation)
                            .with_entity("task")
                            .with_entity_id(task_id),
                    ));
                }
                Some(task) if task.project_id != *project_id => {
                    return Err(RepositoryError::validation_with_context(
                        format!("Task {} does not belong to project {}", task_id, project_id),
                        ErrorContext::new(operation)
                            .with_entity("task")
                            .with_entity_id(task_id),
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Transition an entry to stopped. The caller owns the slot update.
    fn stop_in_place(entry: &mut TimeEntry, now: DateTime<Utc>) {
        entry.duration = (now - entry.start_time).num_seconds().max(0);
        entry.end_time = Some(now);
        entry.is_running = false;
    }

    /// Clear the timer slot if it points at a removed entry.
    fn release_slot_if(&mut self, removed: impl Fn(&EntryId) -> bool) {
        if let Some(active) = &self.active_entry_id {
            if removed(active) {
                self.active_entry_id = None;
            }
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project directly, bypassing async plumbing. Test/setup helper.
    pub fn insert_project_impl(&self, project: Project) -> ProjectId {
        let mut data = self.data.write();
        let id = project.id.clone();
        data.projects.insert(id.clone(), project);
        id
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unhealthy = !healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let unhealthy = data.unhealthy;
        *data = LocalData {
            unhealthy,
            ..Default::default()
        };
    }

    /// Number of entries stored.
    pub fn entry_count(&self) -> usize {
        self.data.read().entries.len()
    }

    fn check_health(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if data.unhealthy {
            return Err(RepositoryError::connection_with_context(
                "Store unreachable",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryRepository for LocalRepository {
    async fn list_entries(&self) -> RepositoryResult<Vec<TimeEntry>> {
        let data = self.data.read();
        Self::check_health(&data, "list_entries")?;
        let mut entries: Vec<TimeEntry> = data.entries.values().cloned().collect();
        entries.sort_by_key(|e| e.start_time);
        Ok(entries)
    }

    async fn list_entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TimeEntry>> {
        let data = self.data.read();
        Self::check_health(&data, "list_entries_between")?;
        let mut entries: Vec<TimeEntry> = data
            .entries
            .values()
            .filter(|e| e.start_time >= start && e.start_time <= end)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.start_time);
        Ok(entries)
    }

    async fn get_entry(&self, id: &EntryId) -> RepositoryResult<Option<TimeEntry>> {
        let data = self.data.read();
        Self::check_health(&data, "get_entry")?;
        Ok(data.entries.get(id).cloned())
    }

    async fn insert_entry(&self, entry: TimeEntry) -> RepositoryResult<TimeEntry> {
        let mut data = self.data.write();
        Self::check_health(&data, "insert_entry")?;

        if entry.is_running {
            return Err(RepositoryError::validation_with_context(
                "Running entries are created through begin_entry",
                ErrorContext::new("insert_entry")
                    .with_entity("entry")
                    .with_entity_id(&entry.id),
            ));
        }
        if entry.duration < 0 {
            return Err(RepositoryError::validation_with_context(
                format!("Negative duration: {}", entry.duration),
                ErrorContext::new("insert_entry").with_entity("entry"),
            ));
        }
        data.validate_entry_refs("insert_entry", &entry.project_id, entry.task_id.as_ref())?;
        if data.entries.contains_key(&entry.id) {
            return Err(RepositoryError::validation_with_context(
                format!("Duplicate entry id: {}", entry.id),
                ErrorContext::new("insert_entry")
                    .with_entity("entry")
                    .with_entity_id(&entry.id),
            ));
        }

        data.entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn update_entry(
        &self,
        id: &EntryId,
        patch: EntryPatch,
    ) -> RepositoryResult<Option<TimeEntry>> {
        let mut data = self.data.write();
        Self::check_health(&data, "update_entry")?;

        let Some(current) = data.entries.get(id).cloned() else {
            return Ok(None);
        };
        if current.is_running {
            return Err(RepositoryError::validation_with_context(
                "Cannot edit a running entry; stop the timer first",
                ErrorContext::new("update_entry")
                    .with_entity("entry")
                    .with_entity_id(id),
            ));
        }
        if let Some(duration) = patch.duration {
            if duration < 0 {
                return Err(RepositoryError::validation_with_context(
                    format!("Negative duration: {}", duration),
                    ErrorContext::new("update_entry")
                        .with_entity("entry")
                        .with_entity_id(id),
                ));
            }
        }

        let mut updated = current;
        if let Some(project_id) = patch.project_id {
            updated.project_id = project_id;
        }
        if let Some(task_id) = patch.task_id {
            updated.task_id = Some(task_id);
        }
        data.validate_entry_refs("update_entry", &updated.project_id, updated.task_id.as_ref())?;
        if let Some(start_time) = patch.start_time {
            updated.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            updated.end_time = Some(end_time);
        }
        if let Some(duration) = patch.duration {
            updated.duration = duration;
        }
        if let Some(tags) = patch.tags {
            updated.tags = tags;
        }
        if let Some(notes) = patch.notes {
            updated.notes = Some(notes);
        }

        data.entries.insert(id.clone(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete_entry(&self, id: &EntryId) -> RepositoryResult<bool> {
        let mut data = self.data.write();
        Self::check_health(&data, "delete_entry")?;
        let removed = data.entries.remove(id).is_some();
        if removed {
            data.release_slot_if(|active| active == id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl TimerRepository for LocalRepository {
    async fn running_entry(&self) -> RepositoryResult<Option<TimeEntry>> {
        let data = self.data.read();
        Self::check_health(&data, "running_entry")?;
        Ok(data
            .active_entry_id
            .as_ref()
            .and_then(|id| data.entries.get(id))
            .cloned())
    }

    async fn begin_entry(
        &self,
        new: NewTimerEntry,
        now: DateTime<Utc>,
    ) -> RepositoryResult<StartedTimer> {
        let mut data = self.data.write();
        Self::check_health(&data, "begin_entry")?;
        data.validate_entry_refs("begin_entry", &new.project_id, new.task_id.as_ref())?;

        // Implicit RUNNING -> IDLE transition; not an error condition.
        let stopped = if let Some(active_id) = data.active_entry_id.take() {
            data.entries.get_mut(&active_id).map(|entry| {
                LocalData::stop_in_place(entry, now);
                entry.clone()
            })
        } else {
            None
        };

        let started = TimeEntry {
            id: EntryId::generate(),
            project_id: new.project_id,
            task_id: new.task_id,
            start_time: now,
            end_time: None,
            duration: 0,
            is_running: true,
            tags: new.tags,
            notes: new.notes,
            activities: Vec::new(),
        };
        data.entries.insert(started.id.clone(), started.clone());
        data.active_entry_id = Some(started.id.clone());

        Ok(StartedTimer { stopped, started })
    }

    async fn finish_entry(
        &self,
        id: &EntryId,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Option<TimeEntry>> {
        let mut data = self.data.write();
        Self::check_health(&data, "finish_entry")?;

        // No-op unless `id` is the active entry: stopping an already-stopped
        // entry must never rewrite its duration.
        if data.active_entry_id.as_ref() != Some(id) {
            return Ok(None);
        }
        data.active_entry_id = None;
        let stopped = data.entries.get_mut(id).map(|entry| {
            LocalData::stop_in_place(entry, now);
            entry.clone()
        });
        Ok(stopped)
    }
}

#[async_trait]
impl ProjectRepository for LocalRepository {
    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        let data = self.data.read();
        Self::check_health(&data, "list_projects")?;
        let mut projects: Vec<Project> = data.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn get_project(&self, id: &ProjectId) -> RepositoryResult<Option<Project>> {
        let data = self.data.read();
        Self::check_health(&data, "get_project")?;
        Ok(data.projects.get(id).cloned())
    }

    async fn insert_project(&self, project: Project) -> RepositoryResult<Project> {
        let mut data = self.data.write();
        Self::check_health(&data, "insert_project")?;
        if data.projects.contains_key(&project.id) {
            return Err(RepositoryError::validation_with_context(
                format!("Duplicate project id: {}", project.id),
                ErrorContext::new("insert_project")
                    .with_entity("project")
                    .with_entity_id(&project.id),
            ));
        }
        data.projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: &ProjectId) -> RepositoryResult<bool> {
        let mut data = self.data.write();
        Self::check_health(&data, "delete_project")?;
        if data.projects.remove(id).is_none() {
            return Ok(false);
        }
        data.tasks.retain(|_, task| task.project_id != *id);
        let removed_ids: Vec<EntryId> = data
            .entries
            .values()
            .filter(|e| e.project_id == *id)
            .map(|e| e.id.clone())
            .collect();
        for entry_id in &removed_ids {
            data.entries.remove(entry_id);
        }
        data.release_slot_if(|active| removed_ids.contains(active));
        Ok(true)
    }

    async fn list_tasks(&self, project_id: Option<&ProjectId>) -> RepositoryResult<Vec<Task>> {
        let data = self.data.read();
        Self::check_health(&data, "list_tasks")?;
        let mut tasks: Vec<Task> = data
            .tasks
            .values()
            .filter(|t| project_id.is_none_or(|p| t.project_id == *p))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn insert_task(&self, task: Task) -> RepositoryResult<Task> {
        let mut data = self.data.write();
        Self::check_health(&data, "insert_task")?;
        if !data.projects.contains_key(&task.project_id) {
            return Err(RepositoryError::validation_with_context(
                format!("Unknown project: {}", task.project_id),
                ErrorContext::new("insert_task")
                    .with_entity("project")
                    .with_entity_id(&task.project_id),
            ));
        }
        if data.tasks.contains_key(&task.id) {
            return Err(RepositoryError::validation_with_context(
                format!("Duplicate task id: {}", task.id),
                ErrorContext::new("insert_task")
                    .with_entity("task")
                    .with_entity_id(&task.id),
            ));
        }
        data.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> RepositoryResult<bool> {
        let mut data = self.data.write();
        Self::check_health(&data, "delete_task")?;
        if data.tasks.remove(id).is_none() {
            return Ok(false);
        }
        let removed_ids: Vec<EntryId> = data
            .entries
            .values()
            .filter(|e| e.task_id.as_ref() == Some(id))
            .map(|e| e.id.clone())
            .collect();
        for entry_id in &removed_ids {
            data.entries.remove(entry_id);
        }
        data.release_slot_if(|active| removed_ids.contains(active));
        Ok(true)
    }
}

#[async_trait]
impl GoalRepository for LocalRepository {
    async fn list_goals(&self) -> RepositoryResult<Vec<Goal>> {
        let data = self.data.read();
        Self::check_health(&data, "list_goals")?;
        let mut goals: Vec<Goal> = data.goals.values().cloned().collect();
        goals.sort_by_key(|g| g.start_date);
        Ok(goals)
    }

    async fn get_goal(&self, id: &GoalId) -> RepositoryResult<Option<Goal>> {
        let data = self.data.read();
        Self::check_health(&data, "get_goal")?;
        Ok(data.goals.get(id).cloned())
    }

    async fn insert_goal(&self, goal: Goal) -> RepositoryResult<Goal> {
        let mut data = self.data.write();
        Self::check_health(&data, "insert_goal")?;
        if goal.end_date <= goal.start_date {
            return Err(RepositoryError::validation_with_context(
                "Goal window must satisfy start_date < end_date",
                ErrorContext::new("insert_goal")
                    .with_entity("goal")
                    .with_entity_id(&goal.id),
            ));
        }
        if goal.target_hours <= 0.0 {
            return Err(RepositoryError::validation_with_context(
                format!("Non-positive target hours: {}", goal.target_hours),
                ErrorContext::new("insert_goal")
                    .with_entity("goal")
                    .with_entity_id(&goal.id),
            ));
        }
        if let Some(project_id) = &goal.project_id {
            if !data.projects.contains_key(project_id) {
                return Err(RepositoryError::validation_with_context(
                    format!("Unknown project: {}", project_id),
                    ErrorContext::new("insert_goal")
                        .with_entity("project")
                        .with_entity_id(project_id),
                ));
            }
        }
        data.goals.insert(goal.id.clone(), goal.clone());
        Ok(goal)
    }

    async fn delete_goal(&self, id: &GoalId) -> RepositoryResult<bool> {
        let mut data = self.data.write();
        Self::check_health(&data, "delete_goal")?;
        Ok(data.goals.remove(id).is_some())
    }
}

#[async_trait]
impl HealthCheck for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.data.read().unhealthy)
    }
}
