//! Concurrent acceptance tests over a shared roster.

use super::helpers::{Marketplace, marketplace};
use eyre::ensure;
use rstest::rstest;
use skillconnect::account::AccountId;
use skillconnect::offer::services::{OfferLifecycleError, RespondToOfferRequest};
use std::sync::Arc;

const STUDENTS: usize = 16;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_acceptances_lose_no_students(marketplace: Marketplace) -> eyre::Result<()> {
    let task = marketplace.post_task("Festival volunteers").await?;
    let mut pending = Vec::with_capacity(STUDENTS);
    for _ in 0..STUDENTS {
        let student = AccountId::new();
        pending.push((student, marketplace.offer(&task, student).await?));
    }
    let shared = Arc::new(marketplace);

    let handles: Vec<_> = pending
        .iter()
        .map(|(_, offer)| {
            let market = Arc::clone(&shared);
            let request = RespondToOfferRequest::new(offer.id().to_string(), "accept");
            tokio::spawn(async move { market.offers.respond(request).await })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let mut roster = shared.roster(&task).await?;
    roster.sort();
    let mut expected: Vec<_> = pending.iter().map(|(student, _)| *student).collect();
    expected.sort();
    ensure!(roster == expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_responses_to_one_offer_have_one_winner(
    marketplace: Marketplace,
) -> eyre::Result<()> {
    let task = marketplace.post_task("Data labelling").await?;
    let student = AccountId::new();
    let offer = marketplace.offer(&task, student).await?;
    let shared = Arc::new(marketplace);

    let handles: Vec<_> = ["accept", "decline", "accept", "decline"]
        .into_iter()
        .map(|action| {
            let market = Arc::clone(&shared);
            let request = RespondToOfferRequest::new(offer.id().to_string(), action);
            tokio::spawn(async move { market.offers.respond(request).await })
        })
        .collect();
    let mut winners = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => winners += 1,
            Err(OfferLifecycleError::Conflict(_)) => {}
            Err(other) => return Err(other.into()),
        }
    }

    ensure!(winners == 1);
    ensure!(shared.roster(&task).await?.len() <= 1);
    Ok(())
}
