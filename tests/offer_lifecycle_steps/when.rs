//! When steps for offer lifecycle BDD scenarios.

use super::world::{OfferLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use skillconnect::offer::services::RespondToOfferRequest;

#[when(r#"the student responds with "{action}""#)]
fn student_responds(world: &mut OfferLifecycleWorld, action: String) -> Result<(), eyre::Report> {
    let offer_id = world.offer()?.id();
    let result = run_async(
        world
            .offers
            .respond(RespondToOfferRequest::new(offer_id.to_string(), action)),
    );
    world.last_response = Some(result);
    Ok(())
}
