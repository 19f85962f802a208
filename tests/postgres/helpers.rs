//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Uses `pg-embed-setup-unpriv` for embedded `PostgreSQL` lifecycle management.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::print_stderr,
    reason = "Test cleanup warnings are informational"
)]

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use skillconnect::account::AccountId;
use skillconnect::database::{MIGRATIONS, build_pool};
use skillconnect::offer::{
    adapters::postgres::PostgresOfferRepository,
    domain::Offer,
    services::{IssueOfferRequest, OfferLifecycleService},
};
use skillconnect::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{Task, TaskId},
    services::{PostTaskRequest, TaskLifecycleService},
};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Boxed error type used by setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "skillconnect_test_template";

/// Pool size large enough for concurrent callers to overlap.
const POOL_SIZE: u32 = 4;

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with every migration applied.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            for &(name, sql) in MIGRATIONS {
                conn.batch_execute(sql)
                    .map_err(|e| eyre::eyre!("migration {name} failed: {e}"))?;
            }
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Runs raw SQL against a test database.
pub fn execute_sql(cluster: &TestCluster, db_name: &str, sql: &str) {
    let url = cluster.connection().database_url(db_name);
    let mut conn = PgConnection::establish(&url).expect("connect to test database");
    conn.batch_execute(sql).expect("execute test SQL");
}

/// Services over one `PostgreSQL` test database.
pub struct PgMarketplace {
    pub offers: OfferLifecycleService<PostgresOfferRepository, DefaultClock>,
    pub offer_store: Arc<PostgresOfferRepository>,
    pub tasks: TaskLifecycleService<PostgresTaskRepository, DefaultClock>,
}

impl PgMarketplace {
    /// Posts a task for a fresh organization.
    pub async fn post_task(&self) -> Task {
        self.tasks
            .post_task(PostTaskRequest::new(
                AccountId::new().to_string(),
                "Digitise parish records",
            ))
            .await
            .expect("task posting should succeed")
    }

    /// Issues an offer for `task_id` to `student`.
    pub async fn offer(&self, task_id: TaskId, student: AccountId) -> Offer {
        self.offers
            .issue(IssueOfferRequest::new(
                task_id.to_string(),
                student.to_string(),
                AccountId::new().to_string(),
                1_100,
                "2026-12-07",
            ))
            .await
            .expect("offer issue should succeed")
    }

    /// Returns the stored task.
    pub async fn stored_task(&self, task: &Task) -> Task {
        self.tasks
            .find_by_id(task.id())
            .await
            .expect("task lookup should succeed")
            .expect("task should exist")
    }
}

/// Creates a test database from the template and wires services to it.
pub fn setup_marketplace(cluster: &TestCluster, db_name: &str) -> Result<PgMarketplace, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let pool = build_pool(&url, POOL_SIZE)?;
    let clock = Arc::new(DefaultClock);
    let offer_store = Arc::new(PostgresOfferRepository::new(pool.clone()));
    Ok(PgMarketplace {
        offers: OfferLifecycleService::new(Arc::clone(&offer_store), Arc::clone(&clock)),
        offer_store,
        tasks: TaskLifecycleService::new(Arc::new(PostgresTaskRepository::new(pool)), clock),
    })
}

/// Guard that drops the test database even if the test panics.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}
