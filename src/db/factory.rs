//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::repo_config::RepositoryConfig;
use super::repositories::{CachedRepository, LocalRepository};
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// Local repository behind the TTL read cache
    CachedLocal,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cached" | "cached-local" => Ok(Self::CachedLocal),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    /// Defaults to `Local`.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::Local)
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use tempo_rust::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local)?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::CachedLocal => {
                Ok(Self::create_cached(Self::create_local(), None))
            }
        }
    }

    /// Create a repository from a loaded configuration file.
    pub fn from_config(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type: RepositoryType = config.repository.repo_type.parse().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository config: {}", e))
        })?;
        let base = match repo_type {
            RepositoryType::Local | RepositoryType::CachedLocal => Self::create_local(),
        };
        if config.cache.enabled || repo_type == RepositoryType::CachedLocal {
            let ttl = Duration::from_secs(config.cache.ttl_seconds);
            return Ok(Self::create_cached(base, Some(ttl)));
        }
        Ok(base)
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Wrap a repository with the TTL read cache.
    pub fn create_cached(
        inner: Arc<dyn FullRepository>,
        ttl: Option<Duration>,
    ) -> Arc<dyn FullRepository> {
        match ttl {
            Some(ttl) => Arc::new(CachedRepository::with_ttl(inner, ttl)),
            None => Arc::new(CachedRepository::new(inner)),
        }
    }
}
