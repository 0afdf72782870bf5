//! When steps for routine sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use chrono::{DateTime, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the sweep runs at "{instant}""#)]
fn sweep_runs(world: &mut SweepWorld, instant: String) -> Result<(), eyre::Report> {
    let now: DateTime<Utc> = instant
        .parse()
        .wrap_err("parse sweep instant for scenario")?;
    let result = run_async(world.materializer.run_daily_sweep(now));
    world.last_sweep = Some(result);
    Ok(())
}
