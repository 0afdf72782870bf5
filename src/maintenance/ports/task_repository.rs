//! Repository port for routine maintenance task persistence.

use crate::maintenance::domain::{OrganizationId, RoutineTask, RoutineTaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for routine task repository operations.
pub type RoutineTaskRepositoryResult<T> = Result<T, RoutineTaskRepositoryError>;

/// Routine task persistence contract.
#[async_trait]
pub trait RoutineTaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &RoutineTask) -> RoutineTaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskRepositoryError::NotFound`] when the task does
    /// not exist.
    async fn update(&self, task: &RoutineTask) -> RoutineTaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: RoutineTaskId)
    -> RoutineTaskRepositoryResult<Option<RoutineTask>>;

    /// Returns every task of an organization, newest first.
    async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RoutineTaskRepositoryResult<Vec<RoutineTask>>;

    /// Returns every active task across all organizations.
    async fn list_active(&self) -> RoutineTaskRepositoryResult<Vec<RoutineTask>>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskRepositoryError::NotFound`] when the task does
    /// not exist.
    async fn delete(&self, id: RoutineTaskId) -> RoutineTaskRepositoryResult<()>;
}

/// Errors returned by routine task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoutineTaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate routine task identifier: {0}")]
    DuplicateTask(RoutineTaskId),

    /// The task was not found.
    #[error("routine task not found: {0}")]
    NotFound(RoutineTaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoutineTaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
