//! Repository trait definitions for store operations.
//!
//! The store is an opaque collaborator accessed through a collection of
//! focused traits. Splitting responsibilities keeps implementations small
//! and lets tests implement only what they exercise.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`entries`]: CRUD for time entries
//! - [`timer`]: The single-running-entry slot (`begin`/`finish`/`running`)
//! - [`projects`]: Project/task hierarchy with cascade deletes
//! - [`goals`]: Goal storage
//!
//! # Convenience Trait Bound
//!
//! For functions that need the whole store, use the [`FullRepository`]
//! trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     let started = repo.begin_entry(new, Utc::now()).await?;
//!     let entries = repo.list_entries().await?;
//!     Ok(())
//! }
//! ```

pub mod entries;
pub mod error;
pub mod goals;
pub mod projects;
pub mod timer;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits and their payload types
pub use entries::{EntryPatch, EntryRepository};
pub use goals::GoalRepository;
pub use projects::ProjectRepository;
pub use timer::{NewTimerEntry, StartedTimer, TimerRepository};

/// Composite trait bound for a complete store implementation.
///
/// Automatically implemented for any type that implements all four
/// repository traits plus a health probe.
pub trait FullRepository:
    EntryRepository + TimerRepository + ProjectRepository + GoalRepository + HealthCheck
{
}

impl<T> FullRepository for T where
    T: EntryRepository + TimerRepository + ProjectRepository + GoalRepository + HealthCheck
{
}

impl std::fmt::Debug for dyn FullRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn FullRepository")
    }
}

/// Connection health probe.
#[async_trait::async_trait]
pub trait HealthCheck: Send + Sync {
    /// Whether the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
