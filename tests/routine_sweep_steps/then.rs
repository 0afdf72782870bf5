//! Then steps for routine sweep BDD scenarios.

use super::world::SweepWorld;
use chrono::NaiveDate;
use eyre::WrapErr;
use repair_request::maintenance::{
    domain::{GeneratedTicket, RoutineTaskId, TicketPriority, TicketStatus},
    services::SkipReason,
};
use rstest_bdd_macros::then;

fn single_ticket(world: &SweepWorld) -> Result<GeneratedTicket, eyre::Report> {
    let mut tickets = world.tickets.all().wrap_err("read stored tickets")?;
    eyre::ensure!(
        tickets.len() == 1,
        "expected exactly one ticket, found {}",
        tickets.len()
    );
    tickets
        .pop()
        .ok_or_else(|| eyre::eyre!("expected a stored ticket"))
}

fn task_id(world: &SweepWorld) -> Result<RoutineTaskId, eyre::Report> {
    world
        .task
        .as_ref()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing routine task in scenario world"))
}

fn ensure_skipped(world: &SweepWorld, reason: SkipReason) -> Result<(), eyre::Report> {
    let expected = task_id(world)?;
    let skipped = world.report()?.skipped_for(reason);
    eyre::ensure!(
        skipped == vec![expected],
        "expected task {expected} skipped as {reason:?}, found {skipped:?}"
    );
    Ok(())
}

#[then("the sweep reports {count:usize} created tickets")]
fn sweep_created(world: &SweepWorld, count: usize) -> Result<(), eyre::Report> {
    let created = world.report()?.created.len();
    eyre::ensure!(
        created == count,
        "expected {count} created tickets, found {created}"
    );
    Ok(())
}

#[then(r#"the ticket title is "{title}""#)]
fn ticket_title(world: &SweepWorld, title: String) -> Result<(), eyre::Report> {
    let ticket = single_ticket(world)?;
    eyre::ensure!(
        ticket.title() == title,
        "expected title {title:?}, found {:?}",
        ticket.title()
    );
    Ok(())
}

#[then(r#"the ticket is pending with medium priority due on "{due_date}""#)]
fn ticket_pending_medium(world: &SweepWorld, due_date: String) -> Result<(), eyre::Report> {
    let expected: NaiveDate = due_date.parse().wrap_err("parse expected due date")?;
    let ticket = single_ticket(world)?;
    eyre::ensure!(
        ticket.status() == TicketStatus::Pending,
        "expected pending ticket, found {}",
        ticket.status().as_str()
    );
    eyre::ensure!(
        ticket.priority() == TicketPriority::Medium,
        "expected medium priority, found {}",
        ticket.priority().as_str()
    );
    eyre::ensure!(
        ticket.due_date() == expected,
        "expected due date {expected}, found {}",
        ticket.due_date()
    );
    eyre::ensure!(
        ticket.source_task_id() == task_id(world)?,
        "ticket does not reference the scenario task"
    );
    Ok(())
}

#[then("the task is skipped as not due")]
fn skipped_not_due(world: &SweepWorld) -> Result<(), eyre::Report> {
    ensure_skipped(world, SkipReason::NotDue)
}

#[then("the task is skipped as already ticketed")]
fn skipped_already_ticketed(world: &SweepWorld) -> Result<(), eyre::Report> {
    ensure_skipped(world, SkipReason::AlreadyTicketed)
}

#[then("the ticket store holds {count:usize} tickets")]
fn store_holds(world: &SweepWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.tickets.all().wrap_err("read stored tickets")?.len();
    eyre::ensure!(stored == count, "expected {count} stored tickets, found {stored}");
    Ok(())
}
