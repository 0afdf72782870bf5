//! Given steps for routine sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use chrono::NaiveDate;
use eyre::WrapErr;
use repair_request::maintenance::{
    domain::{ActorRole, UserId},
    services::RegisterRoutineTaskRequest,
};
use rstest_bdd_macros::given;

#[given(r#"a "{recurrence}" routine task for "{facility}" "{event}" begun on "{date_begun}""#)]
fn routine_task(
    world: &mut SweepWorld,
    recurrence: String,
    facility: String,
    event: String,
    date_begun: String,
) -> Result<(), eyre::Report> {
    let date_begun: NaiveDate = date_begun
        .parse()
        .wrap_err("parse date begun for routine task scenario")?;
    let request = RegisterRoutineTaskRequest::new(
        world.organization_id,
        UserId::new(),
        facility,
        event,
        date_begun,
        recurrence,
    );
    let task = run_async(world.catalogue.register(ActorRole::Admin, request))
        .wrap_err("register routine task for sweep scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given("the task has been deactivated")]
fn task_deactivated(world: &mut SweepWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .task
        .as_ref()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing routine task in scenario world"))?;
    let updated = run_async(world.catalogue.deactivate(ActorRole::Maintenance, task_id))
        .wrap_err("deactivate routine task")?;
    world.task = Some(updated);
    Ok(())
}
