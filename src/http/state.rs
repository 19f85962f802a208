//! Shared application state handed to every handler.

use crate::admin::AdminGate;
use crate::database::PgPool;
use crate::offer::{
    adapters::{memory::InMemoryOfferRepository, postgres::PostgresOfferRepository},
    ports::OfferRepository,
    services::OfferLifecycleService,
};
use crate::profile::{
    adapters::{
        memory::{InMemoryAccountDirectory, InMemoryProfileRepository},
        postgres::{PostgresAccountDirectory, PostgresProfileRepository},
    },
    ports::{AccountDirectory, ProfileRepository},
    services::ProfileBootstrapService,
};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskLifecycleService,
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Offer service over a type-erased repository.
pub type OfferService = OfferLifecycleService<dyn OfferRepository, DefaultClock>;
/// Task service over a type-erased repository.
pub type TaskService = TaskLifecycleService<dyn TaskRepository, DefaultClock>;
/// Profile service over type-erased stores.
pub type ProfileService =
    ProfileBootstrapService<dyn ProfileRepository, dyn AccountDirectory, DefaultClock>;

/// Services and the admin gate shared across requests.
#[derive(Clone)]
pub struct AppState {
    /// Offer issuing and responses.
    pub offers: Arc<OfferService>,
    /// Task posting and lookup.
    pub tasks: Arc<TaskService>,
    /// First-login profile bootstrapping.
    pub profiles: Arc<ProfileService>,
    /// Admin session issuing and verification.
    pub admin: Arc<AdminGate>,
}

impl AppState {
    /// Builds state backed by in-memory stores.
    #[must_use]
    pub fn in_memory(admin: AdminGate) -> Self {
        let tasks = InMemoryTaskRepository::new();
        let offers = InMemoryOfferRepository::new(tasks.clone());
        Self::from_stores(
            Arc::new(offers),
            Arc::new(tasks),
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryAccountDirectory::new()),
            admin,
        )
    }

    /// Builds state backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(pool: &PgPool, admin: AdminGate) -> Self {
        Self::from_stores(
            Arc::new(PostgresOfferRepository::new(pool.clone())),
            Arc::new(PostgresTaskRepository::new(pool.clone())),
            Arc::new(PostgresProfileRepository::new(pool.clone())),
            Arc::new(PostgresAccountDirectory::new(pool.clone())),
            admin,
        )
    }

    fn from_stores(
        offers: Arc<dyn OfferRepository>,
        tasks: Arc<dyn TaskRepository>,
        profiles: Arc<dyn ProfileRepository>,
        accounts: Arc<dyn AccountDirectory>,
        admin: AdminGate,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            offers: Arc::new(OfferLifecycleService::new(offers, Arc::clone(&clock))),
            tasks: Arc::new(TaskLifecycleService::new(tasks, Arc::clone(&clock))),
            profiles: Arc::new(ProfileBootstrapService::new(profiles, accounts, clock)),
            admin: Arc::new(admin),
        }
    }
}
