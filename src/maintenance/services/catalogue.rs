//! Service layer for registering and managing routine maintenance tasks.

use crate::maintenance::{
    domain::{
        ActorRole, MaintenanceDomainError, NewRoutineTask, OrganizationId, Recurrence,
        RoutineTask, RoutineTaskId, TaskDetails, UserId,
    },
    ports::{RoutineTaskRepository, RoutineTaskRepositoryError},
};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a routine maintenance task.
///
/// Mirrors the submission form: recurrence fields arrive as text and are
/// validated when the request is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRoutineTaskRequest {
    organization_id: OrganizationId,
    created_by: UserId,
    facility: String,
    event: String,
    date_begun: NaiveDate,
    recurrence: String,
    custom_recurrence: Option<String>,
    description: Option<String>,
    room_number: Option<String>,
}

impl RegisterRoutineTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        organization_id: OrganizationId,
        created_by: UserId,
        facility: impl Into<String>,
        event: impl Into<String>,
        date_begun: NaiveDate,
        recurrence: impl Into<String>,
    ) -> Self {
        Self {
            organization_id,
            created_by,
            facility: facility.into(),
            event: event.into(),
            date_begun,
            recurrence: recurrence.into(),
            custom_recurrence: None,
            description: None,
            room_number: None,
        }
    }

    /// Sets the day count used by custom schedules.
    #[must_use]
    pub fn with_custom_recurrence(mut self, custom_recurrence: impl Into<String>) -> Self {
        self.custom_recurrence = Some(custom_recurrence.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the room number.
    #[must_use]
    pub fn with_room_number(mut self, room_number: impl Into<String>) -> Self {
        self.room_number = Some(room_number.into());
        self
    }
}

/// Request payload for moving a task's schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateScheduleRequest {
    task_id: RoutineTaskId,
    date_begun: Option<NaiveDate>,
    recurrence: Option<(String, Option<String>)>,
}

impl UpdateScheduleRequest {
    /// Creates a request that leaves the schedule unchanged.
    #[must_use]
    pub const fn new(task_id: RoutineTaskId) -> Self {
        Self {
            task_id,
            date_begun: None,
            recurrence: None,
        }
    }

    /// Moves the schedule start.
    #[must_use]
    pub const fn with_date_begun(mut self, date_begun: NaiveDate) -> Self {
        self.date_begun = Some(date_begun);
        self
    }

    /// Replaces the recurrence, using the same text fields as registration.
    #[must_use]
    pub fn with_recurrence(
        mut self,
        recurrence: impl Into<String>,
        custom_recurrence: Option<String>,
    ) -> Self {
        self.recurrence = Some((recurrence.into(), custom_recurrence));
        self
    }
}

/// Service-level errors for routine task operations.
#[derive(Debug, Error)]
pub enum RoutineTaskServiceError {
    /// Validation or authorization failed.
    #[error(transparent)]
    Domain(#[from] MaintenanceDomainError),

    /// The task does not exist.
    #[error("routine task not found: {0}")]
    NotFound(RoutineTaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoutineTaskRepositoryError),
}

/// Result type for routine task service operations.
pub type RoutineTaskServiceResult<T> = Result<T, RoutineTaskServiceError>;

/// Routine task catalogue service.
#[derive(Clone)]
pub struct RoutineTaskService<R, C>
where
    R: RoutineTaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    utc_offset: FixedOffset,
}

impl<R, C> RoutineTaskService<R, C>
where
    R: RoutineTaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new routine task service working in UTC.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            utc_offset: Utc.fix(),
        }
    }

    /// Sets the offset used to interpret "now" as a calendar date.
    #[must_use]
    pub const fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Registers a new, active routine task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Domain`] when the actor may not
    /// manage tasks or the submission is invalid, and
    /// [`RoutineTaskServiceError::Repository`] when persistence fails.
    pub async fn register(
        &self,
        actor: ActorRole,
        request: RegisterRoutineTaskRequest,
    ) -> RoutineTaskServiceResult<RoutineTask> {
        ensure_can_manage(actor, "create routine maintenance tasks")?;

        let mut details = TaskDetails::new(request.facility, request.event)?;
        if let Some(description) = request.description {
            details = details.with_description(description);
        }
        if let Some(room_number) = request.room_number {
            details = details.with_room_number(room_number);
        }
        let recurrence = Recurrence::parse_submission(
            &request.recurrence,
            request.custom_recurrence.as_deref(),
        )?;

        let task = RoutineTask::new(
            NewRoutineTask {
                organization_id: request.organization_id,
                details,
                date_begun: request.date_begun,
                recurrence,
                created_by: request.created_by,
            },
            &*self.clock,
        );
        self.repository.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            organization_id = %task.organization_id(),
            recurrence = %task.recurrence(),
            "registered routine maintenance task"
        );
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Repository`] when lookup fails.
    pub async fn find(&self, id: RoutineTaskId) -> RoutineTaskServiceResult<Option<RoutineTask>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists an organization's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Repository`] when lookup fails.
    pub async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RoutineTaskServiceResult<Vec<RoutineTask>> {
        Ok(self
            .repository
            .list_for_organization(organization_id)
            .await?)
    }

    /// Changes the start date and/or recurrence of a task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Domain`] for forbidden or invalid
    /// input and [`RoutineTaskServiceError::NotFound`] for unknown tasks.
    pub async fn update_schedule(
        &self,
        actor: ActorRole,
        request: UpdateScheduleRequest,
    ) -> RoutineTaskServiceResult<RoutineTask> {
        ensure_can_manage(actor, "edit routine maintenance tasks")?;
        let mut task = self.load(request.task_id).await?;

        let recurrence = match request.recurrence {
            Some((kind, custom)) => Recurrence::parse_submission(&kind, custom.as_deref())?,
            None => task.recurrence(),
        };
        let date_begun = request.date_begun.unwrap_or_else(|| task.date_begun());

        task.reschedule(date_begun, recurrence, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %task.id(), %date_begun, %recurrence, "rescheduled routine task");
        Ok(task)
    }

    /// Replaces the facility, event, description and room number of a task.
    ///
    /// The schedule is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Domain`] for forbidden actors and
    /// [`RoutineTaskServiceError::NotFound`] for unknown tasks.
    pub async fn revise_details(
        &self,
        actor: ActorRole,
        id: RoutineTaskId,
        details: TaskDetails,
    ) -> RoutineTaskServiceResult<RoutineTask> {
        ensure_can_manage(actor, "edit routine maintenance tasks")?;
        let mut task = self.load(id).await?;
        task.revise_details(details, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(
            task_id = %id,
            facility = task.details().facility(),
            event = task.details().event(),
            "revised routine task details"
        );
        Ok(task)
    }

    /// Stops ticket generation for a task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Domain`] for forbidden actors and
    /// [`RoutineTaskServiceError::NotFound`] for unknown tasks.
    pub async fn deactivate(
        &self,
        actor: ActorRole,
        id: RoutineTaskId,
    ) -> RoutineTaskServiceResult<RoutineTask> {
        ensure_can_manage(actor, "deactivate routine maintenance tasks")?;
        let mut task = self.load(id).await?;
        task.deactivate(&*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, "deactivated routine task");
        Ok(task)
    }

    /// Resumes ticket generation for a task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Domain`] for forbidden actors and
    /// [`RoutineTaskServiceError::NotFound`] for unknown tasks.
    pub async fn reactivate(
        &self,
        actor: ActorRole,
        id: RoutineTaskId,
    ) -> RoutineTaskServiceResult<RoutineTask> {
        ensure_can_manage(actor, "reactivate routine maintenance tasks")?;
        let mut task = self.load(id).await?;
        task.reactivate(&*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, "reactivated routine task");
        Ok(task)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::Domain`] for forbidden actors and
    /// [`RoutineTaskServiceError::NotFound`] for unknown tasks.
    pub async fn delete(&self, actor: ActorRole, id: RoutineTaskId) -> RoutineTaskServiceResult<()> {
        ensure_can_manage(actor, "delete routine maintenance tasks")?;
        self.repository.delete(id).await.map_err(|err| match err {
            RoutineTaskRepositoryError::NotFound(missing) => {
                RoutineTaskServiceError::NotFound(missing)
            }
            other => RoutineTaskServiceError::Repository(other),
        })?;
        tracing::info!(task_id = %id, "deleted routine task");
        Ok(())
    }

    /// Lists the next `count` due dates of a task after the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineTaskServiceError::NotFound`] for unknown tasks.
    pub async fn upcoming(
        &self,
        id: RoutineTaskId,
        count: usize,
    ) -> RoutineTaskServiceResult<Vec<NaiveDate>> {
        let task = self.load(id).await?;
        let reference = self
            .clock
            .utc()
            .with_timezone(&self.utc_offset)
            .naive_local();
        Ok(task.upcoming_due_dates(reference, count))
    }

    async fn load(&self, id: RoutineTaskId) -> RoutineTaskServiceResult<RoutineTask> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RoutineTaskServiceError::NotFound(id))
    }
}

fn ensure_can_manage(actor: ActorRole, action: &'static str) -> Result<(), MaintenanceDomainError> {
    if actor.can_manage_routine_tasks() {
        Ok(())
    } else {
        tracing::warn!(role = %actor, action, "refused routine task operation");
        Err(MaintenanceDomainError::PermissionDenied {
            role: actor,
            action,
        })
    }
}
