//! In-memory adapters for tests and single-process hosts.

mod task;
mod ticket;

pub use task::InMemoryRoutineTaskRepository;
pub use ticket::InMemoryTicketRepository;
