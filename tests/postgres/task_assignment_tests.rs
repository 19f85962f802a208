//! Roster set-union updates against `PostgreSQL`.

use crate::postgres::helpers::{CleanupGuard, ensure_template, setup_marketplace, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use skillconnect::account::AccountId;
use skillconnect::task::domain::{AssignmentOutcome, TaskAssignment, TaskId, TaskStatus};
use std::sync::Arc;

#[rstest]
fn assignment_is_idempotent_on_membership(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_assign_once_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup");
    let rt = test_runtime();

    let task = rt.block_on(market.post_task());
    let student = AccountId::new();
    let assignment = TaskAssignment::new(task.id(), student);
    let first = rt
        .block_on(market.tasks.assign_student(assignment))
        .expect("first assignment");
    let second = rt
        .block_on(market.tasks.assign_student(assignment))
        .expect("second assignment");

    let stored = rt.block_on(market.stored_task(&task));
    assert_eq!(first, AssignmentOutcome::Added);
    assert_eq!(second, AssignmentOutcome::AlreadyAssigned);
    assert_eq!(stored.assigned_students(), [student]);
    assert_eq!(stored.status(), TaskStatus::Active);
}

#[rstest]
fn assignment_to_missing_task_changes_nothing(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_assign_missing_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup");
    let rt = test_runtime();

    let outcome = rt
        .block_on(
            market
                .tasks
                .assign_student(TaskAssignment::new(TaskId::new(), AccountId::new())),
        )
        .expect("missing task is not an error");

    assert_eq!(outcome, AssignmentOutcome::TaskMissing);
}

#[rstest]
fn concurrent_assignments_keep_every_student(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_assign_concurrent_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let market = Arc::new(
        setup_marketplace(shared_test_cluster, &db_name).expect("marketplace setup"),
    );
    let rt = test_runtime();

    let task = rt.block_on(market.post_task());
    let mut students: Vec<_> = (0..12).map(|_| AccountId::new()).collect();
    let repeated = students.first().copied().expect("at least one student");

    let outcomes: Vec<_> = rt.block_on(async {
        let handles: Vec<_> = students
            .iter()
            .copied()
            .chain(std::iter::once(repeated))
            .map(|student| {
                let shared = Arc::clone(&market);
                let assignment = TaskAssignment::new(task.id(), student);
                tokio::spawn(async move { shared.tasks.assign_student(assignment).await })
            })
            .collect();
        let mut joined = Vec::new();
        for handle in handles {
            joined.push(
                handle
                    .await
                    .expect("assignment task should join")
                    .expect("assignment should succeed"),
            );
        }
        joined
    });

    let mut roster = rt
        .block_on(market.stored_task(&task))
        .assigned_students()
        .to_vec();
    roster.sort();
    students.sort();
    assert_eq!(roster, students);
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| **outcome == AssignmentOutcome::AlreadyAssigned)
            .count(),
        1
    );
}
