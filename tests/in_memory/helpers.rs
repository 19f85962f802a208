//! Shared test helpers for in-memory integration tests.

use rstest::fixture;
use skillconnect::account::AccountId;
use skillconnect::offer::{
    adapters::memory::InMemoryOfferRepository,
    domain::Offer,
    services::{IssueOfferRequest, OfferLifecycleService},
};
use skillconnect::profile::{
    adapters::memory::{InMemoryAccountDirectory, InMemoryProfileRepository},
    services::ProfileBootstrapService,
};
use skillconnect::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{PostTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Offer service over in-memory storage.
pub type OfferService = OfferLifecycleService<InMemoryOfferRepository, DefaultClock>;
/// Task service over in-memory storage.
pub type TaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;
/// Profile service over in-memory storage.
pub type ProfileService =
    ProfileBootstrapService<InMemoryProfileRepository, InMemoryAccountDirectory, DefaultClock>;

/// Services sharing one set of in-memory stores.
pub struct Marketplace {
    pub offers: OfferService,
    pub tasks: TaskService,
    pub profiles: ProfileService,
}

impl Marketplace {
    /// Posts a task for a fresh organization.
    ///
    /// # Errors
    ///
    /// Returns an error if posting fails.
    pub async fn post_task(&self, title: &str) -> eyre::Result<Task> {
        Ok(self
            .tasks
            .post_task(PostTaskRequest::new(AccountId::new().to_string(), title))
            .await?)
    }

    /// Issues an offer for `task` to `student`.
    ///
    /// # Errors
    ///
    /// Returns an error if issuing fails.
    pub async fn offer(&self, task: &Task, student: AccountId) -> eyre::Result<Offer> {
        Ok(self
            .offers
            .issue(IssueOfferRequest::new(
                task.id().to_string(),
                student.to_string(),
                task.org_id().to_string(),
                1_000,
                "2026-11-16",
            ))
            .await?)
    }

    /// Returns the stored roster of `task`.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be loaded.
    pub async fn roster(&self, task: &Task) -> eyre::Result<Vec<AccountId>> {
        let stored = self
            .tasks
            .find_by_id(task.id())
            .await?
            .ok_or_else(|| eyre::eyre!("task {} not found", task.id()))?;
        Ok(stored.assigned_students().to_vec())
    }
}

/// Provides services over fresh shared in-memory stores.
#[fixture]
pub fn marketplace() -> Marketplace {
    let task_repository = InMemoryTaskRepository::new();
    let clock = Arc::new(DefaultClock);
    Marketplace {
        offers: OfferLifecycleService::new(
            Arc::new(InMemoryOfferRepository::new(task_repository.clone())),
            Arc::clone(&clock),
        ),
        tasks: TaskLifecycleService::new(Arc::new(task_repository), Arc::clone(&clock)),
        profiles: ProfileBootstrapService::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryAccountDirectory::new()),
            clock,
        ),
    }
}
