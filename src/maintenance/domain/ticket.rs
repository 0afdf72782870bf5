//! Support tickets materialized from routine maintenance tasks.

use super::{OrganizationId, ParseTicketFieldError, RoutineTask, RoutineTaskId, TicketId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Category of a support request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Ticket generated by the routine maintenance sweep.
    RoutineMaintenance,
}

impl RequestType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoutineMaintenance => "routine_maintenance",
        }
    }
}

impl TryFrom<&str> for RequestType {
    type Error = ParseTicketFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "routine_maintenance" => Ok(Self::RoutineMaintenance),
            _ => Err(ParseTicketFieldError {
                field: "request_type",
                value: value.to_owned(),
            }),
        }
    }
}

/// Ticket urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// Can wait.
    Low,
    /// Default for scheduled work.
    Medium,
    /// Needs prompt attention.
    High,
    /// Needs immediate attention.
    Urgent,
}

impl TicketPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for TicketPriority {
    type Error = ParseTicketFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTicketFieldError {
                field: "priority",
                value: value.to_owned(),
            }),
        }
    }
}

/// Ticket workflow status.
///
/// Transitions after creation belong to the general ticket workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Awaiting triage.
    Pending,
    /// Accepted and scheduled.
    Approved,
    /// Being worked on.
    InProgress,
    /// Finished.
    Completed,
    /// Declined.
    Rejected,
}

impl TicketStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for TicketStatus {
    type Error = ParseTicketFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTicketFieldError {
                field: "status",
                value: value.to_owned(),
            }),
        }
    }
}

/// Rendered text of a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketText {
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
}

/// One occurrence of a routine maintenance task as a support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTicket {
    id: TicketId,
    source_task_id: RoutineTaskId,
    organization_id: OrganizationId,
    requestor_id: UserId,
    request_type: RequestType,
    title: String,
    description: String,
    priority: TicketPriority,
    status: TicketStatus,
    building: String,
    room_number: Option<String>,
    due_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTicketData {
    /// Persisted ticket identifier.
    pub id: TicketId,
    /// Task that produced the ticket.
    pub source_task_id: RoutineTaskId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// User recorded as requestor.
    pub requestor_id: UserId,
    /// Request category.
    pub request_type: RequestType,
    /// Ticket title.
    pub title: String,
    /// Ticket description.
    pub description: String,
    /// Ticket urgency.
    pub priority: TicketPriority,
    /// Workflow status.
    pub status: TicketStatus,
    /// Building name.
    pub building: String,
    /// Room number, if any.
    pub room_number: Option<String>,
    /// Day the occurrence was materialized for.
    pub due_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl GeneratedTicket {
    /// Builds the pending, medium-priority ticket for one occurrence of
    /// `task` on `due_date`.
    #[must_use]
    pub fn for_occurrence(
        task: &RoutineTask,
        due_date: NaiveDate,
        text: TicketText,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TicketId::new(),
            source_task_id: task.id(),
            organization_id: task.organization_id(),
            requestor_id: task.created_by(),
            request_type: RequestType::RoutineMaintenance,
            title: text.title,
            description: text.description,
            priority: TicketPriority::Medium,
            status: TicketStatus::Pending,
            building: task.details().facility().to_owned(),
            room_number: task.details().room_number().map(str::to_owned),
            due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a ticket from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTicketData) -> Self {
        Self {
            id: data.id,
            source_task_id: data.source_task_id,
            organization_id: data.organization_id,
            requestor_id: data.requestor_id,
            request_type: data.request_type,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            building: data.building,
            room_number: data.room_number,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the ticket identifier.
    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// Returns the task that produced the ticket.
    #[must_use]
    pub const fn source_task_id(&self) -> RoutineTaskId {
        self.source_task_id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the user recorded as requestor.
    #[must_use]
    pub const fn requestor_id(&self) -> UserId {
        self.requestor_id
    }

    /// Returns the request category.
    #[must_use]
    pub const fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn priority(&self) -> TicketPriority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Returns the building name.
    #[must_use]
    pub fn building(&self) -> &str {
        &self.building
    }

    /// Returns the room number, if any.
    #[must_use]
    pub fn room_number(&self) -> Option<&str> {
        self.room_number.as_deref()
    }

    /// Returns the day the occurrence was materialized for.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
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
}
