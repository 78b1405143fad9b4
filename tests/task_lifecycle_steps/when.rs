//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, parse_status, run_async};
use rstest_bdd_macros::when;

#[when(r#""{title}" is moved to "{status}""#)]
fn task_is_moved(
    world: &mut TaskLifecycleWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let target = parse_status(&status)?;
    world.last_status_result = Some(run_async(world.service.change_status(id, target)));
    Ok(())
}

#[when(r#""{title}" is removed"#)]
fn task_is_removed(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    world.last_removal_result = Some(run_async(world.service.remove(id)));
    Ok(())
}
