//! In-memory integration tests where catalogue changes steer later sweeps.

use super::helpers::{Maintenance, date, maintenance};
use repair_request::maintenance::{
    domain::ActorRole,
    ports::TicketRepository,
    services::{SkipReason, UpdateScheduleRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn paused_days_produce_no_tickets(maintenance: Maintenance) {
    let task = maintenance
        .register("Sprinkler test", date(2024, 6, 1), "daily")
        .await
        .expect("registration should succeed");

    maintenance
        .sweep_days(date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("sweeps should run");
    maintenance
        .catalogue
        .deactivate(ActorRole::Maintenance, task.id())
        .await
        .expect("deactivation should succeed");
    maintenance
        .sweep_days(date(2024, 6, 3), date(2024, 6, 4))
        .await
        .expect("sweeps should run");
    maintenance
        .catalogue
        .reactivate(ActorRole::Maintenance, task.id())
        .await
        .expect("reactivation should succeed");
    maintenance
        .sweep_days(date(2024, 6, 5), date(2024, 6, 5))
        .await
        .expect("sweep should run");

    let tickets = maintenance
        .tickets
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    let due_dates: Vec<_> = tickets.iter().map(|ticket| ticket.due_date()).collect();
    assert_eq!(
        due_dates,
        vec![date(2024, 6, 1), date(2024, 6, 2), date(2024, 6, 5)]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rescheduled_task_follows_its_new_anchor(maintenance: Maintenance) {
    let task = maintenance
        .register("Pump service", date(2024, 6, 1), "weekly")
        .await
        .expect("registration should succeed");
    maintenance
        .catalogue
        .update_schedule(
            ActorRole::Admin,
            UpdateScheduleRequest::new(task.id()).with_date_begun(date(2024, 6, 3)),
        )
        .await
        .expect("reschedule should succeed");

    let reports = maintenance
        .sweep_days(date(2024, 6, 1), date(2024, 6, 10))
        .await
        .expect("sweeps should run");

    let created_days: Vec<_> = reports
        .iter()
        .filter(|report| !report.created.is_empty())
        .map(|report| report.day)
        .collect();
    assert_eq!(created_days, vec![date(2024, 6, 3), date(2024, 6, 10)]);
    let not_due = reports
        .iter()
        .filter(|report| report.skipped_for(SkipReason::NotDue) == vec![task.id()])
        .count();
    assert_eq!(not_due, 8);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_keeps_its_tickets(maintenance: Maintenance) {
    let task = maintenance
        .register("Grease trap", date(2024, 6, 1), "daily")
        .await
        .expect("registration should succeed");
    maintenance
        .sweep_days(date(2024, 6, 1), date(2024, 6, 1))
        .await
        .expect("sweep should run");

    maintenance
        .catalogue
        .delete(ActorRole::Admin, task.id())
        .await
        .expect("delete should succeed");
    let reports = maintenance
        .sweep_days(date(2024, 6, 2), date(2024, 6, 2))
        .await
        .expect("sweep should run");

    assert!(reports.iter().all(|report| report.created.is_empty()));
    let remaining = maintenance
        .tickets
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    assert_eq!(remaining.len(), 1);
}
