//! Daily sweep that turns due routine maintenance tasks into tickets.

use super::template::render_ticket_text;
use crate::config::{DuplicateScope, SweepConfig};
use crate::maintenance::{
    domain::{
        ActorRole, GeneratedTicket, MaintenanceDomainError, RoutineTask, RoutineTaskId, TicketId,
    },
    ports::{
        RoutineTaskRepository, RoutineTaskRepositoryError, TicketInsertOutcome, TicketRepository,
        TicketRepositoryError,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Why a task produced no ticket in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The task has no occurrence on the sweep day.
    NotDue,
    /// A ticket covering the task and day already exists.
    AlreadyTicketed,
}

/// A task the sweep left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedTask {
    /// Skipped task.
    pub task_id: RoutineTaskId,
    /// Why no ticket was created.
    pub reason: SkipReason,
}

/// Failure while materializing the ticket of a single task.
#[derive(Debug, Error)]
pub enum TaskSweepError {
    /// A ticket template could not be rendered.
    #[error("ticket template failed to render: {0}")]
    Template(#[from] minijinja::Error),

    /// The ticket store rejected a read or write.
    #[error(transparent)]
    Repository(#[from] TicketRepositoryError),
}

/// A task whose ticket could not be materialized.
#[derive(Debug)]
pub struct FailedTask {
    /// Task being processed.
    pub task_id: RoutineTaskId,
    /// What went wrong.
    pub error: TaskSweepError,
}

/// Result of one sweep.
#[derive(Debug)]
pub struct SweepReport {
    /// Calendar day the sweep evaluated.
    pub day: NaiveDate,
    /// Tickets created, in task order.
    pub created: Vec<TicketId>,
    /// Tasks that needed no ticket.
    pub skipped: Vec<SkippedTask>,
    /// Tasks whose ticket could not be created.
    pub failed: Vec<FailedTask>,
}

impl SweepReport {
    const fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            created: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Returns the identifiers of every skipped task.
    #[must_use]
    pub fn skipped_ids(&self) -> Vec<RoutineTaskId> {
        self.skipped.iter().map(|skipped| skipped.task_id).collect()
    }

    /// Returns the identifiers of tasks skipped for `reason`.
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> Vec<RoutineTaskId> {
        self.skipped
            .iter()
            .filter(|skipped| skipped.reason == reason)
            .map(|skipped| skipped.task_id)
            .collect()
    }

    /// Returns the identifiers of tasks that failed.
    #[must_use]
    pub fn failed_ids(&self) -> Vec<RoutineTaskId> {
        self.failed.iter().map(|failed| failed.task_id).collect()
    }
}

/// Errors that abort a sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The active task list could not be read. The next scheduled run
    /// retries.
    #[error("failed to list active routine tasks: {0}")]
    ListActiveTasks(#[source] RoutineTaskRepositoryError),

    /// The caller may not run the sweep.
    #[error(transparent)]
    Domain(#[from] MaintenanceDomainError),
}

enum TaskOutcome {
    Created(TicketId),
    Skipped(SkipReason),
}

/// Sweep service materializing tickets for due routine tasks.
#[derive(Clone)]
pub struct TicketMaterializer<T, K, C>
where
    T: RoutineTaskRepository,
    K: TicketRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    tickets: Arc<K>,
    clock: Arc<C>,
    config: SweepConfig,
}

impl<T, K, C> TicketMaterializer<T, K, C>
where
    T: RoutineTaskRepository,
    K: TicketRepository,
    C: Clock + Send + Sync,
{
    /// Creates a materializer with default configuration.
    #[must_use]
    pub fn new(tasks: Arc<T>, tickets: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            tickets,
            clock,
            config: SweepConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SweepConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Runs the sweep for the current clock instant.
    ///
    /// # Errors
    ///
    /// See [`Self::run_daily_sweep`].
    pub async fn run_now(&self) -> Result<SweepReport, SweepError> {
        self.run_daily_sweep(self.clock.utc()).await
    }

    /// Runs the sweep on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::PermissionDenied`] unless the actor
    /// is a super admin, otherwise see [`Self::run_daily_sweep`].
    pub async fn trigger(&self, actor: ActorRole) -> Result<SweepReport, SweepError> {
        if !actor.can_trigger_sweep() {
            tracing::warn!(role = %actor, "refused manual routine maintenance sweep");
            return Err(MaintenanceDomainError::PermissionDenied {
                role: actor,
                action: "trigger the routine maintenance sweep",
            }
            .into());
        }
        tracing::info!(role = %actor, "manual routine maintenance sweep requested");
        self.run_now().await
    }

    /// Creates a ticket for every active task due on the day containing
    /// `now`.
    ///
    /// Per-task failures are logged and reported in
    /// [`SweepReport::failed`]; they never abort the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::ListActiveTasks`] when the active tasks cannot
    /// be read.
    pub async fn run_daily_sweep(&self, now: DateTime<Utc>) -> Result<SweepReport, SweepError> {
        let today = now.with_timezone(&self.config.utc_offset).date_naive();
        tracing::info!(%today, "starting routine maintenance sweep");

        let active = self
            .tasks
            .list_active()
            .await
            .map_err(SweepError::ListActiveTasks)?;
        tracing::info!(count = active.len(), "found active routine maintenance tasks");

        let mut report = SweepReport::empty(today);
        for task in &active {
            match self.process_task(task, today, now).await {
                Ok(TaskOutcome::Created(ticket_id)) => report.created.push(ticket_id),
                Ok(TaskOutcome::Skipped(reason)) => report.skipped.push(SkippedTask {
                    task_id: task.id(),
                    reason,
                }),
                Err(error) => {
                    tracing::error!(
                        task_id = %task.id(),
                        %error,
                        "failed to create routine maintenance ticket"
                    );
                    report.failed.push(FailedTask {
                        task_id: task.id(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            %today,
            created = report.created.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "routine maintenance sweep completed"
        );
        Ok(report)
    }

    async fn process_task(
        &self,
        task: &RoutineTask,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<TaskOutcome, TaskSweepError> {
        if !task.is_due_on(today) {
            tracing::debug!(task_id = %task.id(), %today, "routine task not due");
            return Ok(TaskOutcome::Skipped(SkipReason::NotDue));
        }
        tracing::debug!(
            task_id = %task.id(),
            facility = task.details().facility(),
            event = task.details().event(),
            "routine task due today"
        );

        if self.config.duplicate_scope == DuplicateScope::Organization
            && self
                .tickets
                .exists_for_organization_on(task.organization_id(), today)
                .await?
        {
            tracing::debug!(
                task_id = %task.id(),
                organization_id = %task.organization_id(),
                "organization already has a routine ticket today"
            );
            return Ok(TaskOutcome::Skipped(SkipReason::AlreadyTicketed));
        }

        let text = render_ticket_text(&self.config.templates, task, today)?;
        let ticket = GeneratedTicket::for_occurrence(task, today, text, now);
        match self.tickets.insert_if_absent(&ticket).await? {
            TicketInsertOutcome::Created => {
                tracing::info!(
                    task_id = %task.id(),
                    ticket_id = %ticket.id(),
                    title = ticket.title(),
                    "created routine maintenance ticket"
                );
                Ok(TaskOutcome::Created(ticket.id()))
            }
            TicketInsertOutcome::AlreadyExists => {
                tracing::debug!(task_id = %task.id(), "ticket already exists for task today");
                Ok(TaskOutcome::Skipped(SkipReason::AlreadyTicketed))
            }
        }
    }
}
