//! Error types for routine maintenance validation and parsing.

use super::ActorRole;
use thiserror::Error;

/// Errors returned while constructing routine maintenance domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MaintenanceDomainError {
    /// The facility name is empty after trimming.
    #[error("facility must not be empty")]
    EmptyFacility,

    /// The event title is empty after trimming.
    #[error("maintenance event title must not be empty")]
    EmptyEvent,

    /// The facility name exceeds [`super::MAX_TASK_DETAIL_LENGTH`]
    /// characters. Holds the submitted length.
    #[error("facility must be at most 255 characters, got {0}")]
    FacilityTooLong(usize),

    /// The event title exceeds [`super::MAX_TASK_DETAIL_LENGTH`] characters.
    /// Holds the submitted length.
    #[error("maintenance event title must be at most 255 characters, got {0}")]
    EventTooLong(usize),

    /// A custom recurrence was requested without a usable day count.
    #[error("invalid custom recurrence '{0}', expected a positive number of days")]
    InvalidCustomInterval(String),

    /// The recurrence kind could not be parsed.
    #[error(transparent)]
    Recurrence(#[from] ParseRecurrenceError),

    /// The acting user may not perform the operation.
    #[error("role {role} may not {action}")]
    PermissionDenied {
        /// Role of the acting user.
        role: ActorRole,
        /// Short description of the refused operation.
        action: &'static str,
    },
}

/// Error returned while parsing a recurrence kind from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recurrence: {0}")]
pub struct ParseRecurrenceError(pub String);

/// Error returned while parsing ticket enumerations from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field} value: {value}")]
pub struct ParseTicketFieldError {
    /// Name of the field being parsed.
    pub field: &'static str,
    /// Raw value that failed to parse.
    pub value: String,
}

/// Error returned while parsing an actor role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseActorRoleError(pub String);
