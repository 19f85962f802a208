//! Guarded offer responses against `PostgreSQL`.

use crate::postgres::helpers::{
    CleanupGuard, ensure_template, execute_sql, setup_marketplace, test_runtime,
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use skillconnect::account::AccountId;
use skillconnect::offer::{
    domain::{Offer, OfferAction, OfferStatus, OfferTerms, Salary, StartDate},
    ports::{OfferRepository, OfferRepositoryError},
    services::{OfferLifecycleError, RespondToOfferRequest},
};
use skillconnect::task::domain::{AssignmentOutcome, TaskId, TaskStatus};
use std::sync::Arc;

#[rstest]
fn accept_updates_offer_and_roster_together(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_accept_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup");
    let rt = test_runtime();

    let student = AccountId::new();
    let task = rt.block_on(market.post_task());
    let offer = rt.block_on(market.offer(task.id(), student));
    let response = rt
        .block_on(
            market
                .offers
                .respond(RespondToOfferRequest::new(offer.id().to_string(), "accept")),
        )
        .expect("accept should succeed");

    let stored_offer = rt
        .block_on(market.offers.find_by_id(offer.id()))
        .expect("offer should exist");
    let stored_task = rt.block_on(market.stored_task(&task));
    assert_eq!(response.assignment, Some(AssignmentOutcome::Added));
    assert_eq!(stored_offer.status(), OfferStatus::Accepted);
    assert!(stored_offer.responded_at().is_some());
    assert_eq!(stored_task.assigned_students(), [student]);
    assert_eq!(stored_task.status(), TaskStatus::Active);
}

#[rstest]
fn stale_response_is_a_status_conflict(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_stale_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup");
    let rt = test_runtime();

    let task = rt.block_on(market.post_task());
    let mut stale = rt.block_on(market.offer(task.id(), AccountId::new()));
    rt.block_on(
        market
            .offers
            .respond(RespondToOfferRequest::new(stale.id().to_string(), "accept")),
    )
    .expect("first response should succeed");

    stale
        .respond(OfferAction::Decline, &DefaultClock)
        .expect("local copy is still sent");
    let result = rt.block_on(market.offer_store.record_response(&stale, None));

    assert!(matches!(result, Err(OfferRepositoryError::StatusConflict(id)) if id == stale.id()));
    let stored = rt
        .block_on(market.offers.find_by_id(stale.id()))
        .expect("offer should exist");
    assert_eq!(stored.status(), OfferStatus::Accepted);
}

#[rstest]
fn response_to_unstored_offer_is_not_found(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_unstored_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup");
    let rt = test_runtime();

    let task = rt.block_on(market.post_task());
    let mut offer = Offer::issue(
        OfferTerms {
            task_id: task.id(),
            student_id: AccountId::new(),
            org_id: task.org_id(),
            salary: Salary::new(600).expect("salary in range"),
            start_date: StartDate::new("2026-12-14").expect("start date"),
        },
        &DefaultClock,
    );
    offer
        .respond(OfferAction::Accept, &DefaultClock)
        .expect("fresh offer accepts");

    let result = rt.block_on(
        market
            .offer_store
            .record_response(&offer, offer.assignment()),
    );

    assert!(matches!(result, Err(OfferRepositoryError::NotFound(id)) if id == offer.id()));
    assert!(rt.block_on(market.stored_task(&task)).assigned_students().is_empty());
}

#[rstest]
fn failed_roster_update_rolls_back_the_response(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_rollback_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup");
    let rt = test_runtime();

    let task = rt.block_on(market.post_task());
    let offer = rt.block_on(market.offer(task.id(), AccountId::new()));
    execute_sql(
        shared_test_cluster,
        &db_name,
        concat!(
            "ALTER TABLE tasks ADD CONSTRAINT roster_frozen ",
            "CHECK (cardinality(assigned_students) = 0)",
        ),
    );

    let result = rt.block_on(
        market
            .offers
            .respond(RespondToOfferRequest::new(offer.id().to_string(), "accept")),
    );

    assert!(matches!(result, Err(OfferLifecycleError::Storage(_))));
    let stored = rt
        .block_on(market.offers.find_by_id(offer.id()))
        .expect("offer should exist");
    assert_eq!(stored.status(), OfferStatus::Sent);
    assert!(stored.responded_at().is_none());
    assert!(rt.block_on(market.stored_task(&task)).assigned_students().is_empty());
}

#[rstest]
fn accept_without_task_reports_task_missing(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_no_task_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup");
    let rt = test_runtime();

    let offer = rt.block_on(market.offer(TaskId::new(), AccountId::new()));
    let response = rt
        .block_on(
            market
                .offers
                .respond(RespondToOfferRequest::new(offer.id().to_string(), "accept")),
        )
        .expect("accept should succeed without a task");

    assert_eq!(response.offer.status(), OfferStatus::Accepted);
    assert_eq!(response.assignment, Some(AssignmentOutcome::TaskMissing));
}

#[rstest]
fn concurrent_accepts_fill_the_roster(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_concurrent_accepts_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = Arc::new(
        setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup"),
    );
    let rt = test_runtime();

    let task = rt.block_on(market.post_task());
    let mut students = Vec::new();
    let mut offer_ids = Vec::new();
    for _ in 0..8 {
        let student = AccountId::new();
        offer_ids.push(rt.block_on(market.offer(task.id(), student)).id());
        students.push(student);
    }

    rt.block_on(async {
        let handles: Vec<_> = offer_ids
            .iter()
            .map(|offer_id| {
                let shared = Arc::clone(&market);
                let raw_id = offer_id.to_string();
                tokio::spawn(async move {
                    shared
                        .offers
                        .respond(RespondToOfferRequest::new(raw_id, "accept"))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle
                .await
                .expect("response task should join")
                .expect("accept should succeed");
        }
    });

    let mut roster = rt
        .block_on(market.stored_task(&task))
        .assigned_students()
        .to_vec();
    roster.sort();
    students.sort();
    assert_eq!(roster, students);
}

#[rstest]
fn racing_responses_to_one_offer_have_one_winner(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_race_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = Arc::new(
        setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup"),
    );
    let rt = test_runtime();

    let student = AccountId::new();
    let task = rt.block_on(market.post_task());
    let offer = rt.block_on(market.offer(task.id(), student));

    let results: Vec<_> = rt.block_on(async {
        let handles: Vec<_> = ["accept", "decline", "accept", "decline"]
            .into_iter()
            .map(|action| {
                let shared = Arc::clone(&market);
                let raw_id = offer.id().to_string();
                tokio::spawn(async move {
                    shared
                        .offers
                        .respond(RespondToOfferRequest::new(raw_id, action))
                        .await
                })
            })
            .collect();
        let mut joined = Vec::new();
        for handle in handles {
            joined.push(handle.await.expect("response task should join"));
        }
        joined
    });

    let winners: Vec<_> = results.iter().filter_map(|result| result.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(
        results
            .iter()
            .filter(|result| result.is_err())
            .all(|result| matches!(result, Err(OfferLifecycleError::Conflict(_))))
    );
    let stored = rt
        .block_on(market.offers.find_by_id(offer.id()))
        .expect("offer should exist");
    let roster = rt.block_on(market.stored_task(&task)).assigned_students().to_vec();
    let winner = winners.first().map(|response| response.offer.status());
    assert_eq!(Some(stored.status()), winner);
    if stored.status() == OfferStatus::Accepted {
        assert_eq!(roster, [student]);
    } else {
        assert!(roster.is_empty());
    }
}
