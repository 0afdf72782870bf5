//! `PostgreSQL` adapters for routine maintenance persistence.
//!
//! The matching DDL lives in `migrations/`.

mod models;
mod schema;
mod task_repository;
mod ticket_repository;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

pub use task_repository::PostgresRoutineTaskRepository;
pub use ticket_repository::PostgresTicketRepository;

/// `PostgreSQL` connection pool type shared by maintenance adapters.
pub type MaintenancePgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn connect_pool(database_url: &str, max_size: u32) -> Result<MaintenancePgPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}
