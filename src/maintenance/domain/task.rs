//! Routine maintenance task aggregate.

use super::{
    MaintenanceDomainError, OrganizationId, Recurrence, RoutineTaskId, UserId, recurrence,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Longest facility or event accepted, in characters.
pub const MAX_TASK_DETAIL_LENGTH: usize = 255;

/// Validated fields describing what is maintained and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    facility: String,
    event: String,
    description: Option<String>,
    room_number: Option<String>,
}

impl TaskDetails {
    /// Creates validated task details.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::EmptyFacility`] or
    /// [`MaintenanceDomainError::EmptyEvent`] when a required field is blank,
    /// and [`MaintenanceDomainError::FacilityTooLong`] or
    /// [`MaintenanceDomainError::EventTooLong`] when one exceeds
    /// [`MAX_TASK_DETAIL_LENGTH`] characters.
    pub fn new(
        facility: impl Into<String>,
        event: impl Into<String>,
    ) -> Result<Self, MaintenanceDomainError> {
        let facility_text = facility.into().trim().to_owned();
        let event_text = event.into().trim().to_owned();
        if facility_text.is_empty() {
            return Err(MaintenanceDomainError::EmptyFacility);
        }
        if event_text.is_empty() {
            return Err(MaintenanceDomainError::EmptyEvent);
        }
        let facility_length = facility_text.chars().count();
        if facility_length > MAX_TASK_DETAIL_LENGTH {
            return Err(MaintenanceDomainError::FacilityTooLong(facility_length));
        }
        let event_length = event_text.chars().count();
        if event_length > MAX_TASK_DETAIL_LENGTH {
            return Err(MaintenanceDomainError::EventTooLong(event_length));
        }
        Ok(Self {
            facility: facility_text,
            event: event_text,
            description: None,
            room_number: None,
        })
    }

    /// Sets the free-text description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the room number. Blank text clears it.
    #[must_use]
    pub fn with_room_number(mut self, room_number: impl Into<String>) -> Self {
        self.room_number = non_blank(room_number.into());
        self
    }

    /// Returns the building or location name.
    #[must_use]
    pub fn facility(&self) -> &str {
        &self.facility
    }

    /// Returns the short maintenance title.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the room number, if any.
    #[must_use]
    pub fn room_number(&self) -> Option<&str> {
        self.room_number.as_deref()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Recurring maintenance task owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineTask {
    id: RoutineTaskId,
    organization_id: OrganizationId,
    details: TaskDetails,
    date_begun: NaiveDate,
    recurrence: Recurrence,
    is_active: bool,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for registering a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoutineTask {
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// What is maintained and where.
    pub details: TaskDetails,
    /// First day of the schedule.
    pub date_begun: NaiveDate,
    /// Repeat policy.
    pub recurrence: Recurrence,
    /// Registering user.
    pub created_by: UserId,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoutineTaskData {
    /// Persisted task identifier.
    pub id: RoutineTaskId,
    /// Persisted owning organization.
    pub organization_id: OrganizationId,
    /// Persisted details.
    pub details: TaskDetails,
    /// Persisted schedule start.
    pub date_begun: NaiveDate,
    /// Persisted repeat policy.
    pub recurrence: Recurrence,
    /// Persisted activity flag.
    pub is_active: bool,
    /// Persisted registering user.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RoutineTask {
    /// Registers a new, active task.
    #[must_use]
    pub fn new(data: NewRoutineTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: RoutineTaskId::new(),
            organization_id: data.organization_id,
            details: data.details,
            date_begun: data.date_begun,
            recurrence: data.recurrence,
            is_active: true,
            created_by: data.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoutineTaskData) -> Self {
        Self {
            id: data.id,
            organization_id: data.organization_id,
            details: data.details,
            date_begun: data.date_begun,
            recurrence: data.recurrence,
            is_active: data.is_active,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> RoutineTaskId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the task details.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the first day of the schedule.
    #[must_use]
    pub const fn date_begun(&self) -> NaiveDate {
        self.date_begun
    }

    /// Returns the repeat policy.
    #[must_use]
    pub const fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    /// Returns whether the sweep considers this task.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the registering user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the first due date strictly after `reference`.
    #[must_use]
    pub fn next_due_date(&self, reference: NaiveDateTime) -> NaiveDate {
        recurrence::next_due_date(self.date_begun, self.recurrence, reference)
    }

    /// Returns whether the task falls due on `day`.
    #[must_use]
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        recurrence::is_due_on(self.date_begun, self.recurrence, day)
    }

    /// Returns the next `count` due dates strictly after `reference`.
    #[must_use]
    pub fn upcoming_due_dates(&self, reference: NaiveDateTime, count: usize) -> Vec<NaiveDate> {
        recurrence::upcoming_due_dates(self.date_begun, self.recurrence, reference, count)
    }

    /// Replaces the task details.
    pub fn revise_details(&mut self, details: TaskDetails, clock: &impl Clock) {
        self.details = details;
        self.touch(clock);
    }

    /// Moves the schedule to a new start date and policy.
    pub fn reschedule(&mut self, date_begun: NaiveDate, recurrence: Recurrence, clock: &impl Clock) {
        self.date_begun = date_begun;
        self.recurrence = recurrence;
        self.touch(clock);
    }

    /// Stops the sweep from generating tickets for this task.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.set_active(false, clock);
    }

    /// Resumes ticket generation for this task.
    pub fn reactivate(&mut self, clock: &impl Clock) {
        self.set_active(true, clock);
    }

    fn set_active(&mut self, active: bool, clock: &impl Clock) {
        if self.is_active != active {
            self.is_active = active;
            self.touch(clock);
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
