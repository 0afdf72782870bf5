//! `PostgreSQL` repository implementation for generated tickets.

use super::{
    MaintenancePgPool,
    models::{NewTicketRow, TicketRow},
    schema::tickets,
};
use crate::maintenance::{
    domain::{
        GeneratedTicket, OrganizationId, PersistedTicketData, RequestType, RoutineTaskId,
        TicketId, TicketPriority, TicketStatus, UserId,
    },
    ports::{
        TicketInsertOutcome, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed ticket repository.
#[derive(Debug, Clone)]
pub struct PostgresTicketRepository {
    pool: MaintenancePgPool,
}

impl PostgresTicketRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MaintenancePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TicketRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TicketRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TicketRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TicketRepositoryError::persistence)?
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn exists_for_organization_on(
        &self,
        organization_id: OrganizationId,
        day: NaiveDate,
    ) -> TicketRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                tickets::table
                    .filter(tickets::request_type.eq(RequestType::RoutineMaintenance.as_str()))
                    .filter(tickets::organization_id.eq(organization_id.into_inner()))
                    .filter(tickets::due_date.eq(day)),
            ))
            .get_result::<bool>(connection)
            .map_err(TicketRepositoryError::persistence)
        })
        .await
    }

    async fn insert_if_absent(
        &self,
        ticket: &GeneratedTicket,
    ) -> TicketRepositoryResult<TicketInsertOutcome> {
        let ticket_id = ticket.id();
        let new_row = to_new_row(ticket);

        self.run_blocking(move |connection| {
            // The unique index on (source_task_id, due_date) arbitrates
            // concurrent sweeps; a skipped row means another run got there first.
            let inserted = diesel::insert_into(tickets::table)
                .values(&new_row)
                .on_conflict((tickets::source_task_id, tickets::due_date))
                .do_nothing()
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TicketRepositoryError::DuplicateTicket(ticket_id)
                    }
                    _ => TicketRepositoryError::persistence(err),
                })?;
            if inserted == 0 {
                Ok(TicketInsertOutcome::AlreadyExists)
            } else {
                Ok(TicketInsertOutcome::Created)
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<GeneratedTicket>> {
        self.run_blocking(move |connection| {
            let row = tickets::table
                .find(id.into_inner())
                .select(TicketRow::as_select())
                .first::<TicketRow>(connection)
                .optional()
                .map_err(TicketRepositoryError::persistence)?;
            row.map(row_to_ticket).transpose()
        })
        .await
    }

    async fn list_for_task(
        &self,
        task_id: RoutineTaskId,
    ) -> TicketRepositoryResult<Vec<GeneratedTicket>> {
        self.run_blocking(move |connection| {
            let rows = tickets::table
                .filter(tickets::source_task_id.eq(task_id.into_inner()))
                .order(tickets::due_date.asc())
                .select(TicketRow::as_select())
                .load::<TicketRow>(connection)
                .map_err(TicketRepositoryError::persistence)?;
            rows.into_iter().map(row_to_ticket).collect()
        })
        .await
    }
}

fn to_new_row(ticket: &GeneratedTicket) -> NewTicketRow {
    NewTicketRow {
        id: ticket.id().into_inner(),
        source_task_id: ticket.source_task_id().into_inner(),
        organization_id: ticket.organization_id().into_inner(),
        requestor_id: ticket.requestor_id().into_inner(),
        request_type: ticket.request_type().as_str().to_owned(),
        title: ticket.title().to_owned(),
        description: ticket.description().to_owned(),
        priority: ticket.priority().as_str().to_owned(),
        status: ticket.status().as_str().to_owned(),
        building: ticket.building().to_owned(),
        room_number: ticket.room_number().map(str::to_owned),
        due_date: ticket.due_date(),
        created_at: ticket.created_at(),
        updated_at: ticket.updated_at(),
    }
}

fn row_to_ticket(row: TicketRow) -> TicketRepositoryResult<GeneratedTicket> {
    let request_type = RequestType::try_from(row.request_type.as_str())
        .map_err(TicketRepositoryError::persistence)?;
    let priority = TicketPriority::try_from(row.priority.as_str())
        .map_err(TicketRepositoryError::persistence)?;
    let status =
        TicketStatus::try_from(row.status.as_str()).map_err(TicketRepositoryError::persistence)?;

    Ok(GeneratedTicket::from_persisted(PersistedTicketData {
        id: TicketId::from_uuid(row.id),
        source_task_id: RoutineTaskId::from_uuid(row.source_task_id),
        organization_id: OrganizationId::from_uuid(row.organization_id),
        requestor_id: UserId::from_uuid(row.requestor_id),
        request_type,
        title: row.title,
        description: row.description,
        priority,
        status,
        building: row.building,
        room_number: row.room_number,
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
