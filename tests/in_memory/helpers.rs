//! Shared test helpers for in-memory routine maintenance tests.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use eyre::WrapErr;
use mockable::DefaultClock;
use repair_request::maintenance::{
    adapters::memory::{InMemoryRoutineTaskRepository, InMemoryTicketRepository},
    domain::{ActorRole, OrganizationId, RoutineTask, UserId},
    services::{
        RegisterRoutineTaskRequest, RoutineTaskService, SweepReport, TicketMaterializer,
    },
};
use rstest::fixture;

/// Catalogue service over in-memory storage.
pub type MemoryCatalogue = RoutineTaskService<InMemoryRoutineTaskRepository, DefaultClock>;

/// Sweep service over in-memory storage.
pub type MemoryMaterializer =
    TicketMaterializer<InMemoryRoutineTaskRepository, InMemoryTicketRepository, DefaultClock>;

/// Services and stores wired together for one test.
pub struct Maintenance {
    pub catalogue: MemoryCatalogue,
    pub materializer: MemoryMaterializer,
    pub tickets: Arc<InMemoryTicketRepository>,
    pub organization_id: OrganizationId,
}

impl Maintenance {
    /// Registers a task for the fixture organization as an admin.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn register(
        &self,
        event: &str,
        date_begun: NaiveDate,
        recurrence: &str,
    ) -> Result<RoutineTask, eyre::Report> {
        let request = RegisterRoutineTaskRequest::new(
            self.organization_id,
            UserId::new(),
            "North Campus",
            event,
            date_begun,
            recurrence,
        );
        self.catalogue
            .register(ActorRole::Admin, request)
            .await
            .wrap_err("register routine task")
    }

    /// Runs one sweep at midnight UTC of every day in `first..=last`.
    ///
    /// # Errors
    ///
    /// Returns an error when any sweep aborts.
    pub async fn sweep_days(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<SweepReport>, eyre::Report> {
        let mut reports = Vec::new();
        let mut day = first;
        while day <= last {
            let report = self
                .materializer
                .run_daily_sweep(midnight(day))
                .await
                .wrap_err_with(|| format!("sweep {day}"))?;
            reports.push(report);
            day = day
                .checked_add_days(Days::new(1))
                .ok_or_else(|| eyre::eyre!("calendar overflow after {day}"))?;
        }
        Ok(reports)
    }
}

/// Provides services sharing fresh in-memory stores.
#[fixture]
pub fn maintenance() -> Maintenance {
    let tasks = Arc::new(InMemoryRoutineTaskRepository::new());
    let tickets = Arc::new(InMemoryTicketRepository::new());
    let clock = Arc::new(DefaultClock);
    Maintenance {
        catalogue: RoutineTaskService::new(Arc::clone(&tasks), Arc::clone(&clock)),
        materializer: TicketMaterializer::new(tasks, Arc::clone(&tickets), clock),
        tickets,
        organization_id: OrganizationId::new(),
    }
}

/// Builds a calendar date, panicking on invalid input.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Returns midnight UTC at the start of `day`.
#[must_use]
pub fn midnight(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}
