//! Port contracts for routine maintenance.
//!
//! Ports define infrastructure-agnostic interfaces used by the maintenance
//! services.

pub mod task_repository;
pub mod ticket_repository;

pub use task_repository::{
    RoutineTaskRepository, RoutineTaskRepositoryError, RoutineTaskRepositoryResult,
};
pub use ticket_repository::{
    TicketInsertOutcome, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
};
