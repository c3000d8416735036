//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository layer and the HTTP handlers. The
//! report functions are pure over an entry snapshot; the timer functions
//! are the only writers.

pub mod goals;

pub mod reports;

pub mod timer;

pub use goals::{get_goal_progress, goal_progress, list_goal_progress, GoalProgress};
pub use reports::{calculate_streak, generate_heatmap, generate_report};
pub use timer::{current_duration, running_entry, start_timer, stop_timer};

#[cfg(test)]
#[path = "reports_tests.rs"]
mod reports_tests;


#[cfg(test)]
#[path = "goals_tests.rs"]
mod goals_tests;
