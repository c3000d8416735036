//! Project and task repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ProjectId, TaskId};
use crate::models::{Project, Task};

/// Repository trait for the project/task hierarchy.
///
/// Deletions cascade: removing a project removes its tasks and every entry
/// referencing the project; removing a task removes the entries referencing
/// it. A cascaded delete that swallows the running entry also clears the
/// timer slot.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List all projects.
    async fn list_projects(&self) -> RepositoryResult<Vec<Project>>;

    /// Fetch a single project. `Ok(None)` when absent.
    async fn get_project(&self, id: &ProjectId) -> RepositoryResult<Option<Project>>;

    /// Insert a project.
    async fn insert_project(&self, project: Project) -> RepositoryResult<Project>;

    /// Delete a project and cascade to its tasks and entries.
    /// Returns whether the project existed.
    async fn delete_project(&self, id: &ProjectId) -> RepositoryResult<bool>;

    /// List tasks, optionally scoped to one project.
    async fn list_tasks(&self, project_id: Option<&ProjectId>) -> RepositoryResult<Vec<Task>>;

    /// Insert a task. Fails with a validation error when the parent project
    /// is unknown.
    async fn insert_task(&self, task: Task) -> RepositoryResult<Task>;

    /// Delete a task and cascade to its entries.
    /// Returns whether the task existed.
    async fn delete_task(&self, id: &TaskId) -> RepositoryResult<bool>;
}
