//! Diesel row models for routine maintenance persistence.

use super::schema::{routine_tasks, tickets};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for routine task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = routine_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoutineTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning organization.
    pub organization_id: uuid::Uuid,
    /// Building or location name.
    pub facility: String,
    /// Short maintenance title.
    pub event: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Optional room number.
    pub room_number: Option<String>,
    /// First day of the schedule.
    pub date_begun: NaiveDate,
    /// Recurrence kind name.
    pub recurrence: String,
    /// Raw custom day count.
    pub custom_recurrence: Option<String>,
    /// Whether the sweep considers this task.
    pub is_active: bool,
    /// Registering user.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for routine task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = routine_tasks)]
pub struct NewRoutineTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning organization.
    pub organization_id: uuid::Uuid,
    /// Building or location name.
    pub facility: String,
    /// Short maintenance title.
    pub event: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Optional room number.
    pub room_number: Option<String>,
    /// First day of the schedule.
    pub date_begun: NaiveDate,
    /// Recurrence kind name.
    pub recurrence: String,
    /// Custom day count.
    pub custom_recurrence: Option<String>,
    /// Whether the sweep considers this task.
    pub is_active: bool,
    /// Registering user.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable columns of a routine task.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = routine_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct RoutineTaskChangeset {
    /// Building or location name.
    pub facility: String,
    /// Short maintenance title.
    pub event: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Optional room number.
    pub room_number: Option<String>,
    /// First day of the schedule.
    pub date_begun: NaiveDate,
    /// Recurrence kind name.
    pub recurrence: String,
    /// Custom day count.
    pub custom_recurrence: Option<String>,
    /// Whether the sweep considers this task.
    pub is_active: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for ticket records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TicketRow {
    /// Ticket identifier.
    pub id: uuid::Uuid,
    /// Task that produced the ticket.
    pub source_task_id: uuid::Uuid,
    /// Owning organization.
    pub organization_id: uuid::Uuid,
    /// Requesting user.
    pub requestor_id: uuid::Uuid,
    /// Request category.
    pub request_type: String,
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
    /// Urgency.
    pub priority: String,
    /// Workflow status.
    pub status: String,
    /// Building name.
    pub building: String,
    /// Optional room number.
    pub room_number: Option<String>,
    /// Day the occurrence was materialized for.
    pub due_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for ticket records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicketRow {
    /// Ticket identifier.
    pub id: uuid::Uuid,
    /// Task that produced the ticket.
    pub source_task_id: uuid::Uuid,
    /// Owning organization.
    pub organization_id: uuid::Uuid,
    /// Requesting user.
    pub requestor_id: uuid::Uuid,
    /// Request category.
    pub request_type: String,
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
    /// Urgency.
    pub priority: String,
    /// Workflow status.
    pub status: String,
    /// Building name.
    pub building: String,
    /// Optional room number.
    pub room_number: Option<String>,
    /// Day the occurrence was materialized for.
    pub due_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
