//! Goal repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::GoalId;
use crate::models::Goal;

/// Repository trait for goals.
///
/// Goals store only the target; progress is derived from entries at read
/// time by `services::goals` and never persisted.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// List all goals.
    async fn list_goals(&self) -> RepositoryResult<Vec<Goal>>;

    /// Fetch a single goal. `Ok(None)` when absent.
    async fn get_goal(&self, id: &GoalId) -> RepositoryResult<Option<Goal>>;

    /// Insert a goal. Fails with a validation error on an inverted window,
    /// a non-positive target, or an unknown scoped project.
    async fn insert_goal(&self, goal: Goal) -> RepositoryResult<Goal>;

    /// Delete a goal. Returns whether something was removed.
    async fn delete_goal(&self, id: &GoalId) -> RepositoryResult<bool>;
}
