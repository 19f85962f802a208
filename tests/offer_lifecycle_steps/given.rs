//! Given steps for offer lifecycle BDD scenarios.

use super::world::{OfferLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use skillconnect::account::AccountId;
use skillconnect::offer::services::{IssueOfferRequest, RespondToOfferRequest};
use skillconnect::task::services::PostTaskRequest;

#[given("an organization has posted a task")]
fn organization_posted_task(world: &mut OfferLifecycleWorld) -> Result<(), eyre::Report> {
    let task = run_async(world.tasks.post_task(PostTaskRequest::new(
        AccountId::new().to_string(),
        "Assist at the science fair",
    )))
    .wrap_err("post task for offer scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given("the organization has sent an offer to a student")]
fn organization_sent_offer(world: &mut OfferLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let request = IssueOfferRequest::new(
        task.id().to_string(),
        world.student.to_string(),
        task.org_id().to_string(),
        320,
        "2026-11-23",
    );
    let offer = run_async(world.offers.issue(request)).wrap_err("issue offer for scenario")?;
    world.offer = Some(offer);
    Ok(())
}

#[given(r#"the student has already responded with "{action}""#)]
fn student_already_responded(
    world: &mut OfferLifecycleWorld,
    action: String,
) -> Result<(), eyre::Report> {
    let offer_id = world.offer()?.id();
    run_async(
        world
            .offers
            .respond(RespondToOfferRequest::new(offer_id.to_string(), action)),
    )
    .wrap_err("record first response in scenario setup")?;
    Ok(())
}
