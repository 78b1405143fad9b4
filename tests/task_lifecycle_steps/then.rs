//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, parse_status, run_async};
use rstest_bdd_macros::then;
use taskboard::task::services::{BusinessRuleViolation, TaskServiceError};

#[then(r#""{title}" has status "{status}""#)]
fn task_has_status(
    world: &TaskLifecycleWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = run_async(world.service.get_by_id(world.task_id(&title)?))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the status change fails with an invalid transition error")]
fn status_change_fails(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_status_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing status change result"))?;

    if !matches!(result, Err(TaskServiceError::InvalidTransition { .. })) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the removal fails with a validation error")]
fn removal_fails(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_removal_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing removal result"))?;

    if !matches!(
        result,
        Err(TaskServiceError::Validation(
            BusinessRuleViolation::TerminalTaskDeletion(_)
        ))
    ) {
        return Err(eyre::eyre!(
            "expected TerminalTaskDeletion error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("there are {count:u64} tasks in total")]
fn tasks_in_total(world: &TaskLifecycleWorld, count: u64) -> Result<(), eyre::Report> {
    let stats = run_async(world.service.statistics())?;
    let total = u64::try_from(stats.total)?;
    eyre::ensure!(total == count, "expected {count} tasks, found {total}");
    Ok(())
}

#[then(r#"the completion percentage is "{percentage}""#)]
fn completion_percentage(
    world: &TaskLifecycleWorld,
    percentage: String,
) -> Result<(), eyre::Report> {
    let stats = run_async(world.service.statistics())?;
    let rendered = stats.completion_percentage_text();
    eyre::ensure!(
        rendered == percentage,
        "expected completion {percentage}, found {rendered}"
    );
    Ok(())
}
