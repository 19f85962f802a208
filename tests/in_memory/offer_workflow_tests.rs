//! End-to-end offer workflow tests over in-memory storage.

use super::helpers::{Marketplace, marketplace};
use chrono::Utc;
use eyre::ensure;
use rstest::rstest;
use skillconnect::account::AccountId;
use skillconnect::offer::{
    domain::OfferStatus,
    services::{OfferLifecycleError, RespondToOfferRequest},
};
use skillconnect::task::domain::{AssignmentOutcome, TaskStatus};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issued_offer_is_sent_and_timestamped(marketplace: Marketplace) -> eyre::Result<()> {
    let before = Utc::now();
    let task = marketplace.post_task("Photograph community garden").await?;

    let offer = marketplace.offer(&task, AccountId::new()).await?;

    ensure!(offer.status() == OfferStatus::Sent);
    ensure!(offer.sent_at() >= before);
    ensure!(offer.responded_at().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepting_places_student_on_roster(marketplace: Marketplace) -> eyre::Result<()> {
    let task = marketplace.post_task("Digitise membership cards").await?;
    let student = AccountId::new();
    let offer = marketplace.offer(&task, student).await?;

    let response = marketplace
        .offers
        .respond(RespondToOfferRequest::new(offer.id().to_string(), "accept"))
        .await?;

    ensure!(response.offer.status() == OfferStatus::Accepted);
    ensure!(response.offer.responded_at().is_some());
    ensure!(response.assignment == Some(AssignmentOutcome::Added));
    ensure!(marketplace.roster(&task).await? == [student]);
    let stored = marketplace
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    ensure!(stored.status() == TaskStatus::Active);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn declining_records_response_only(marketplace: Marketplace) -> eyre::Result<()> {
    let task = marketplace.post_task("Proofread annual report").await?;
    let offer = marketplace.offer(&task, AccountId::new()).await?;

    marketplace
        .offers
        .respond(RespondToOfferRequest::new(offer.id().to_string(), "decline"))
        .await?;

    let stored = marketplace.offers.find_by_id(offer.id()).await?;
    ensure!(stored.status() == OfferStatus::Declined);
    ensure!(stored.responded_at().is_some());
    ensure!(marketplace.roster(&task).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_acceptance_conflicts_and_appends_once(
    marketplace: Marketplace,
) -> eyre::Result<()> {
    let task = marketplace.post_task("Run survey stall").await?;
    let student = AccountId::new();
    let offer = marketplace.offer(&task, student).await?;
    let request = RespondToOfferRequest::new(offer.id().to_string(), "accept");

    marketplace.offers.respond(request.clone()).await?;
    let second = marketplace.offers.respond(request).await;

    ensure!(matches!(second, Err(OfferLifecycleError::Conflict(_))));
    ensure!(marketplace.roster(&task).await? == [student]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_action_leaves_offer_sent(marketplace: Marketplace) -> eyre::Result<()> {
    let task = marketplace.post_task("Sort donated books").await?;
    let offer = marketplace.offer(&task, AccountId::new()).await?;

    let result = marketplace
        .offers
        .respond(RespondToOfferRequest::new(offer.id().to_string(), "maybe"))
        .await;

    ensure!(matches!(result, Err(OfferLifecycleError::InvalidAction(_))));
    let stored = marketplace.offers.find_by_id(offer.id()).await?;
    ensure!(stored.status() == OfferStatus::Sent);
    ensure!(stored.responded_at().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_student_on_two_tasks_joins_both(marketplace: Marketplace) -> eyre::Result<()> {
    let first = marketplace.post_task("Morning shift").await?;
    let second = marketplace.post_task("Evening shift").await?;
    let student = AccountId::new();
    for task in [&first, &second] {
        let offer = marketplace.offer(task, student).await?;
        marketplace
            .offers
            .respond(RespondToOfferRequest::new(offer.id().to_string(), "accept"))
            .await?;
    }

    ensure!(marketplace.roster(&first).await? == [student]);
    ensure!(marketplace.roster(&second).await? == [student]);
    ensure!(marketplace.offers.offers_for_student(student).await?.len() == 2);
    Ok(())
}
