//! `PostgreSQL` repository implementation for routine task storage.

use super::{
    MaintenancePgPool,
    models::{NewRoutineTaskRow, RoutineTaskChangeset, RoutineTaskRow},
    schema::routine_tasks,
};
use crate::maintenance::{
    domain::{
        OrganizationId, PersistedRoutineTaskData, Recurrence, RoutineTask, RoutineTaskId,
        TaskDetails, UserId,
    },
    ports::{RoutineTaskRepository, RoutineTaskRepositoryError, RoutineTaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed routine task repository.
#[derive(Debug, Clone)]
pub struct PostgresRoutineTaskRepository {
    pool: MaintenancePgPool,
}

impl PostgresRoutineTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MaintenancePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RoutineTaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RoutineTaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(RoutineTaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RoutineTaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl RoutineTaskRepository for PostgresRoutineTaskRepository {
    async fn store(&self, task: &RoutineTask) -> RoutineTaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(routine_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RoutineTaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => RoutineTaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &RoutineTask) -> RoutineTaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(routine_tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(RoutineTaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(RoutineTaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: RoutineTaskId,
    ) -> RoutineTaskRepositoryResult<Option<RoutineTask>> {
        self.run_blocking(move |connection| {
            let row = routine_tasks::table
                .find(id.into_inner())
                .select(RoutineTaskRow::as_select())
                .first::<RoutineTaskRow>(connection)
                .optional()
                .map_err(RoutineTaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RoutineTaskRepositoryResult<Vec<RoutineTask>> {
        self.run_blocking(move |connection| {
            let rows = routine_tasks::table
                .filter(routine_tasks::organization_id.eq(organization_id.into_inner()))
                .order((routine_tasks::created_at.desc(), routine_tasks::id.asc()))
                .select(RoutineTaskRow::as_select())
                .load::<RoutineTaskRow>(connection)
                .map_err(RoutineTaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_active(&self) -> RoutineTaskRepositoryResult<Vec<RoutineTask>> {
        self.run_blocking(move |connection| {
            let rows = routine_tasks::table
                .filter(routine_tasks::is_active.eq(true))
                .order((routine_tasks::created_at.asc(), routine_tasks::id.asc()))
                .select(RoutineTaskRow::as_select())
                .load::<RoutineTaskRow>(connection)
                .map_err(RoutineTaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: RoutineTaskId) -> RoutineTaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(routine_tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RoutineTaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(RoutineTaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn custom_column(recurrence: Recurrence) -> Option<String> {
    recurrence.custom_days().map(|days| days.to_string())
}

fn to_new_row(task: &RoutineTask) -> NewRoutineTaskRow {
    let details = task.details();
    NewRoutineTaskRow {
        id: task.id().into_inner(),
        organization_id: task.organization_id().into_inner(),
        facility: details.facility().to_owned(),
        event: details.event().to_owned(),
        description: details.description().map(str::to_owned),
        room_number: details.room_number().map(str::to_owned),
        date_begun: task.date_begun(),
        recurrence: task.recurrence().kind_str().to_owned(),
        custom_recurrence: custom_column(task.recurrence()),
        is_active: task.is_active(),
        created_by: task.created_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &RoutineTask) -> RoutineTaskChangeset {
    let details = task.details();
    RoutineTaskChangeset {
        facility: details.facility().to_owned(),
        event: details.event().to_owned(),
        description: details.description().map(str::to_owned),
        room_number: details.room_number().map(str::to_owned),
        date_begun: task.date_begun(),
        recurrence: task.recurrence().kind_str().to_owned(),
        custom_recurrence: custom_column(task.recurrence()),
        is_active: task.is_active(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: RoutineTaskRow) -> RoutineTaskRepositoryResult<RoutineTask> {
    let RoutineTaskRow {
        id,
        organization_id,
        facility,
        event,
        description,
        room_number,
        date_begun,
        recurrence: persisted_recurrence,
        custom_recurrence,
        is_active,
        created_by,
        created_at,
        updated_at,
    } = row;

    let recurrence =
        Recurrence::from_stored(&persisted_recurrence, custom_recurrence.as_deref())
            .map_err(RoutineTaskRepositoryError::persistence)?;
    let details = TaskDetails::new(facility, event)
        .map_err(RoutineTaskRepositoryError::persistence)?
        .with_description(description.unwrap_or_default())
        .with_room_number(room_number.unwrap_or_default());

    Ok(RoutineTask::from_persisted(PersistedRoutineTaskData {
        id: RoutineTaskId::from_uuid(id),
        organization_id: OrganizationId::from_uuid(organization_id),
        details,
        date_begun,
        recurrence,
        is_active,
        created_by: UserId::from_uuid(created_by),
        created_at,
        updated_at,
    }))
}
