//! Runs one routine maintenance sweep against `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://... routine-sweep
//! ```
//!
//! Intended to be scheduled once per calendar day (for example from cron
//! shortly after midnight in the configured offset). Sweep settings come
//! from the `REPAIR_REQUEST_*` variables described in
//! [`repair_request::config`]; log verbosity follows `RUST_LOG` (default
//! `info`). The process exits non-zero when configuration is invalid, the
//! database is unreachable, or the active tasks cannot be listed. Failures
//! on individual tasks are logged and do not change the exit status.

use repair_request::config::SweepConfig;
use repair_request::maintenance::{
    adapters::postgres::{PostgresRoutineTaskRepository, PostgresTicketRepository, connect_pool},
    services::TicketMaterializer,
};
use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DATABASE_URL_VAR: &str = "DATABASE_URL";
const POOL_SIZE: u32 = 4;

/// Errors that stop the sweep binary.
#[derive(Debug, Error)]
enum SweepBinaryError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Config(#[from] repair_request::config::ConfigError),

    #[error("failed to connect to database: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error(transparent)]
    Sweep(#[from] repair_request::maintenance::services::SweepError),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "routine maintenance sweep aborted");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SweepBinaryError> {
    let config = SweepConfig::from_env()?;
    let database_url =
        std::env::var(DATABASE_URL_VAR).map_err(|_| SweepBinaryError::MissingDatabaseUrl)?;
    let pool = connect_pool(&database_url, POOL_SIZE)?;

    let materializer = TicketMaterializer::new(
        Arc::new(PostgresRoutineTaskRepository::new(pool.clone())),
        Arc::new(PostgresTicketRepository::new(pool)),
        Arc::new(DefaultClock),
    )
    .with_config(config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(materializer.run_now())?;

    for failed in &report.failed {
        tracing::warn!(task_id = %failed.task_id, error = %failed.error, "task left for next run");
    }
    Ok(())
}
