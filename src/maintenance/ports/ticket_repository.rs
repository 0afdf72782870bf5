//! Repository port for tickets generated by the sweep.

use crate::maintenance::domain::{GeneratedTicket, OrganizationId, RoutineTaskId, TicketId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ticket repository operations.
pub type TicketRepositoryResult<T> = Result<T, TicketRepositoryError>;

/// Outcome of an insert guarded by the `(source_task_id, due_date)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketInsertOutcome {
    /// The ticket was written.
    Created,
    /// A ticket for the same task and day already existed; nothing was
    /// written.
    AlreadyExists,
}

/// Persistence contract for generated tickets.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Reports whether any routine maintenance ticket of the organization
    /// is due on `day`, regardless of which task produced it.
    async fn exists_for_organization_on(
        &self,
        organization_id: OrganizationId,
        day: NaiveDate,
    ) -> TicketRepositoryResult<bool>;

    /// Writes the ticket unless one already exists for its source task and
    /// due date. The check and the write are atomic.
    async fn insert_if_absent(
        &self,
        ticket: &GeneratedTicket,
    ) -> TicketRepositoryResult<TicketInsertOutcome>;

    /// Finds a ticket by identifier.
    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<GeneratedTicket>>;

    /// Returns the tickets generated from a task, oldest due date first.
    async fn list_for_task(
        &self,
        task_id: RoutineTaskId,
    ) -> TicketRepositoryResult<Vec<GeneratedTicket>>;
}

/// Errors returned by ticket repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TicketRepositoryError {
    /// A ticket with the same identifier already exists.
    #[error("duplicate ticket identifier: {0}")]
    DuplicateTicket(TicketId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TicketRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
