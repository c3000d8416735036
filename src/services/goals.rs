//! Goal progress derivation.
//!
//! Progress is always a view recomputed from entries at read time, never a
//! cached fact, so it cannot go stale relative to the entry ledger.

use serde::{Deserialize, Serialize};

use crate::api::GoalId;
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{Goal, TimeEntry};

/// A goal together with its derived progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: Goal,
    /// Hours tracked inside the goal window (and project scope, if any).
    pub current_hours: f64,
    /// `current / target * 100`; may exceed 100 when over-achieved.
    pub percentage: f64,
    pub achieved: bool,
}

/// Derive progress for one goal from an entry snapshot.
///
/// Entries count when their `start_time` falls in the half-open window
/// `[start_date, end_date)` and, for a project-scoped goal, when they
/// belong to that project.
pub fn goal_progress(goal: &Goal, entries: &[TimeEntry]) -> GoalProgress {
    let seconds: i64 = entries
        .iter()
        .filter(|e| e.start_time >= goal.start_date && e.start_time < goal.end_date)
        .filter(|e| {
            goal.project_id
                .as_ref()
                .is_none_or(|p| e.project_id == *p)
        })
        .map(|e| e.duration)
        .sum();
    let current_hours = seconds as f64 / 3600.0;
    let percentage = if goal.target_hours > 0.0 {
        current_hours / goal.target_hours * 100.0
    } else {
        0.0
    };
    GoalProgress {
        goal: goal.clone(),
        current_hours,
        percentage,
        achieved: current_hours >= goal.target_hours,
    }
}

/// Fetch one goal and derive its progress. `Ok(None)` when the goal is
/// unknown.
pub async fn get_goal_progress(
    repo: &dyn FullRepository,
    id: &GoalId,
) -> RepositoryResult<Option<GoalProgress>> {
    let Some(goal) = repo.get_goal(id).await? else {
        return Ok(None);
    };
    let entries = repo.list_entries().await?;
    Ok(Some(goal_progress(&goal, &entries)))
}

/// Derive progress for every stored goal.
pub async fn list_goal_progress(repo: &dyn FullRepository) -> RepositoryResult<Vec<GoalProgress>> {
    let goals = repo.list_goals().await?;
    let entries = repo.list_entries().await?;
    Ok(goals.iter().map(|g| goal_progress(g, &entries)).collect())
}
