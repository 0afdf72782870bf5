//! Domain model for routine maintenance scheduling.
//!
//! Recurrence arithmetic, the task aggregate, and generated tickets live here
//! with no storage or clock access beyond the injected [`mockable::Clock`].

mod error;
mod ids;
pub mod recurrence;
mod role;
mod task;
mod ticket;

pub use error::{
    MaintenanceDomainError, ParseActorRoleError, ParseRecurrenceError, ParseTicketFieldError,
};
pub use ids::{OrganizationId, RoutineTaskId, TicketId, UserId};
pub use recurrence::{CustomInterval, DEFAULT_CUSTOM_INTERVAL_DAYS, Recurrence};
pub use role::ActorRole;
pub use task::{
    MAX_TASK_DETAIL_LENGTH, NewRoutineTask, PersistedRoutineTaskData, RoutineTask, TaskDetails,
};
pub use ticket::{
    GeneratedTicket, PersistedTicketData, RequestType, TicketPriority, TicketStatus, TicketText,
};
