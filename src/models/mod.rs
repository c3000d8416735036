//! Domain models for tracked work.

pub mod entry;
pub mod goal;
pub mod project;

pub use entry::{Activity, TimeEntry};
pub use goal::{Goal, GoalPeriod};
pub use project::{Project, Task};
