//! Then steps for offer lifecycle BDD scenarios.

use super::world::{OfferLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use skillconnect::offer::{domain::OfferStatus, services::OfferLifecycleError};
use skillconnect::task::domain::{Task, TaskStatus};

fn stored_task(world: &OfferLifecycleWorld) -> Result<Task, eyre::Report> {
    let task_id = world.task()?.id();
    run_async(world.tasks.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} not found"))
}

#[then(r#"the offer status is "{status}""#)]
fn offer_status_is(world: &OfferLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = OfferStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let offer_id = world.offer()?.id();
    let stored = run_async(world.offers.find_by_id(offer_id))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the student is on the task roster")]
fn student_on_roster(world: &OfferLifecycleWorld) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if task.assigned_students() != [world.student] {
        return Err(eyre::eyre!(
            "expected roster [{}], found {:?}",
            world.student,
            task.assigned_students()
        ));
    }
    Ok(())
}

#[then("the task roster is empty")]
fn task_roster_is_empty(world: &OfferLifecycleWorld) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if !task.assigned_students().is_empty() {
        return Err(eyre::eyre!(
            "expected empty roster, found {:?}",
            task.assigned_students()
        ));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &OfferLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = stored_task(world)?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected task status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the response fails with a conflict")]
fn response_fails_with_conflict(world: &OfferLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing response result"))?;
    if !matches!(result, Err(OfferLifecycleError::Conflict(_))) {
        return Err(eyre::eyre!("expected Conflict error, got {result:?}"));
    }
    Ok(())
}

#[then("the response fails with an invalid action error")]
fn response_fails_with_invalid_action(world: &OfferLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing response result"))?;
    if !matches!(result, Err(OfferLifecycleError::InvalidAction(_))) {
        return Err(eyre::eyre!("expected InvalidAction error, got {result:?}"));
    }
    Ok(())
}
