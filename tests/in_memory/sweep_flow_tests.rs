//! In-memory integration tests for sweeps spanning several days.

use super::helpers::{Maintenance, date, maintenance};
use repair_request::maintenance::{
    domain::{ActorRole, GeneratedTicket, TicketStatus, UserId},
    ports::TicketRepository,
    services::RegisterRoutineTaskRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_task_is_ticketed_once_per_week(maintenance: Maintenance) {
    let task = maintenance
        .register("Fire door check", date(2024, 6, 1), "weekly")
        .await
        .expect("registration should succeed");

    let reports = maintenance
        .sweep_days(date(2024, 6, 1), date(2024, 6, 30))
        .await
        .expect("sweeps should run");

    let created: usize = reports.iter().map(|report| report.created.len()).sum();
    assert_eq!(created, 5);
    let due_dates: Vec<_> = maintenance
        .tickets
        .list_for_task(task.id())
        .await
        .expect("listing should succeed")
        .iter()
        .map(GeneratedTicket::due_date)
        .collect();
    assert_eq!(
        due_dates,
        vec![
            date(2024, 6, 1),
            date(2024, 6, 8),
            date(2024, 6, 15),
            date(2024, 6, 22),
            date(2024, 6, 29),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn month_end_task_keeps_the_clamped_day(maintenance: Maintenance) {
    let task = maintenance
        .register("Meter reading", date(2024, 1, 31), "monthly")
        .await
        .expect("registration should succeed");

    maintenance
        .sweep_days(date(2024, 2, 1), date(2024, 5, 31))
        .await
        .expect("sweeps should run");

    let due_dates: Vec<_> = maintenance
        .tickets
        .list_for_task(task.id())
        .await
        .expect("listing should succeed")
        .iter()
        .map(GeneratedTicket::due_date)
        .collect();
    assert_eq!(
        due_dates,
        vec![
            date(2024, 2, 29),
            date(2024, 3, 29),
            date(2024, 4, 29),
            date(2024, 5, 29),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_interval_task_uses_its_day_count(maintenance: Maintenance) {
    let without_count = maintenance
        .register("Water sampling", date(2024, 1, 1), "custom")
        .await;
    assert!(without_count.is_err(), "custom schedules need a day count");

    let request = RegisterRoutineTaskRequest::new(
        maintenance.organization_id,
        UserId::new(),
        "North Campus",
        "Water sampling",
        date(2024, 1, 1),
        "custom",
    )
    .with_custom_recurrence("10");
    let task = maintenance
        .catalogue
        .register(ActorRole::Maintenance, request)
        .await
        .expect("registration should succeed");

    maintenance
        .sweep_days(date(2024, 1, 1), date(2024, 1, 31))
        .await
        .expect("sweeps should run");

    let tickets = maintenance
        .tickets
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    let due_dates: Vec<_> = tickets.iter().map(GeneratedTicket::due_date).collect();
    assert_eq!(
        due_dates,
        vec![
            date(2024, 1, 1),
            date(2024, 1, 11),
            date(2024, 1, 21),
            date(2024, 1, 31),
        ]
    );
    assert!(
        tickets
            .iter()
            .all(|ticket| ticket.status() == TicketStatus::Pending)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_tickets_are_retrievable_by_id(maintenance: Maintenance) {
    maintenance
        .register("Lift inspection", date(2024, 6, 3), "daily")
        .await
        .expect("registration should succeed");

    let reports = maintenance
        .sweep_days(date(2024, 6, 3), date(2024, 6, 3))
        .await
        .expect("sweep should run");
    let ticket_id = *reports
        .first()
        .and_then(|report| report.created.first())
        .expect("one ticket created");

    let ticket = maintenance
        .tickets
        .find_by_id(ticket_id)
        .await
        .expect("lookup should succeed")
        .expect("ticket exists");
    assert_eq!(ticket.title(), "Routine: North Campus - Lift inspection");
    assert_eq!(ticket.building(), "North Campus");
}
