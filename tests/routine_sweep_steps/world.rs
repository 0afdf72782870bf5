//! Shared world state for routine sweep BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use repair_request::maintenance::{
    adapters::memory::{InMemoryRoutineTaskRepository, InMemoryTicketRepository},
    domain::{OrganizationId, RoutineTask},
    services::{RoutineTaskService, SweepError, SweepReport, TicketMaterializer},
};
use rstest::fixture;

/// Catalogue service used by the BDD world.
pub type TestCatalogue = RoutineTaskService<InMemoryRoutineTaskRepository, DefaultClock>;

/// Sweep service used by the BDD world.
pub type TestMaterializer =
    TicketMaterializer<InMemoryRoutineTaskRepository, InMemoryTicketRepository, DefaultClock>;

/// Scenario world for routine sweep behaviour tests.
pub struct SweepWorld {
    pub catalogue: TestCatalogue,
    pub materializer: TestMaterializer,
    pub tickets: Arc<InMemoryTicketRepository>,
    pub organization_id: OrganizationId,
    pub task: Option<RoutineTask>,
    pub last_sweep: Option<Result<SweepReport, SweepError>>,
}

impl SweepWorld {
    /// Creates a world backed by empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryRoutineTaskRepository::new());
        let tickets = Arc::new(InMemoryTicketRepository::new());
        let clock = Arc::new(DefaultClock);

        Self {
            catalogue: RoutineTaskService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            materializer: TicketMaterializer::new(tasks, Arc::clone(&tickets), clock),
            tickets,
            organization_id: OrganizationId::new(),
            task: None,
            last_sweep: None,
        }
    }

    /// Returns the report of the most recent successful sweep.
    ///
    /// # Errors
    ///
    /// Returns an error when no sweep ran or the last sweep failed.
    pub fn report(&self) -> Result<&SweepReport, eyre::Report> {
        match self.last_sweep.as_ref() {
            Some(Ok(report)) => Ok(report),
            Some(Err(err)) => Err(eyre::eyre!("last sweep failed: {err}")),
            None => Err(eyre::eyre!("no sweep has run in this scenario")),
        }
    }
}

impl Default for SweepWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SweepWorld {
    SweepWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
