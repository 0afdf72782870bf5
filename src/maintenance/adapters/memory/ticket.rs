//! In-memory repository for generated tickets.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::maintenance::{
    domain::{GeneratedTicket, OrganizationId, RequestType, RoutineTaskId, TicketId},
    ports::{
        TicketInsertOutcome, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
    },
};

/// Thread-safe in-memory ticket repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketRepository {
    state: Arc<RwLock<InMemoryTicketState>>,
}

#[derive(Debug, Default)]
struct InMemoryTicketState {
    tickets: HashMap<TicketId, GeneratedTicket>,
    occurrence_index: HashMap<(RoutineTaskId, NaiveDate), TicketId>,
}

impl InMemoryTicketRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every stored ticket, oldest due date first.
    ///
    /// # Errors
    ///
    /// Returns [`TicketRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn all(&self) -> TicketRepositoryResult<Vec<GeneratedTicket>> {
        let state = self.state.read().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tickets: Vec<GeneratedTicket> = state.tickets.values().cloned().collect();
        tickets.sort_by_key(|ticket| (ticket.due_date(), ticket.created_at(), ticket.id()));
        Ok(tickets)
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn exists_for_organization_on(
        &self,
        organization_id: OrganizationId,
        day: NaiveDate,
    ) -> TicketRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tickets.values().any(|ticket| {
            ticket.request_type() == RequestType::RoutineMaintenance
                && ticket.organization_id() == organization_id
                && ticket.due_date() == day
        }))
    }

    async fn insert_if_absent(
        &self,
        ticket: &GeneratedTicket,
    ) -> TicketRepositoryResult<TicketInsertOutcome> {
        let mut state = self.state.write().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tickets.contains_key(&ticket.id()) {
            return Err(TicketRepositoryError::DuplicateTicket(ticket.id()));
        }

        let key = (ticket.source_task_id(), ticket.due_date());
        if state.occurrence_index.contains_key(&key) {
            return Ok(TicketInsertOutcome::AlreadyExists);
        }

        state.occurrence_index.insert(key, ticket.id());
        state.tickets.insert(ticket.id(), ticket.clone());
        Ok(TicketInsertOutcome::Created)
    }

    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<GeneratedTicket>> {
        let state = self.state.read().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tickets.get(&id).cloned())
    }

    async fn list_for_task(
        &self,
        task_id: RoutineTaskId,
    ) -> TicketRepositoryResult<Vec<GeneratedTicket>> {
        let state = self.state.read().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tickets: Vec<GeneratedTicket> = state
            .tickets
            .values()
            .filter(|ticket| ticket.source_task_id() == task_id)
            .cloned()
            .collect();
        tickets.sort_by_key(GeneratedTicket::due_date);
        Ok(tickets)
    }
}
