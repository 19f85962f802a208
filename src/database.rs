//! `PostgreSQL` connection pooling, blocking helpers, and schema migrations.
//!
//! Diesel is synchronous, so every adapter offloads its queries to the
//! blocking thread pool through [`run_blocking_with`].

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for internal use.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Ordered schema migrations as `(name, up.sql)` pairs.
///
/// Every script is idempotent, so applying the full list to an already
/// migrated database is a no-op.
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "2026-10-01-000000_create_offer_workflow",
        include_str!("../migrations/2026-10-01-000000_create_offer_workflow/up.sql"),
    ),
    (
        "2026-10-01-000001_create_profiles",
        include_str!("../migrations/2026-10-01-000001_create_profiles/up.sql"),
    ),
];

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The requested pool size was zero.
    #[error("connection pool size must be at least 1")]
    EmptyPool,

    /// A migration script failed.
    #[error("migration {name} failed: {source}")]
    Migration {
        /// Name of the failing migration.
        name: &'static str,
        /// Underlying Diesel error.
        #[source]
        source: diesel::result::Error,
    },
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`DatabaseError::EmptyPool`] when `max_size` is zero and
/// [`DatabaseError::Pool`] when the pool cannot establish its initial
/// connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, DatabaseError> {
    if max_size == 0 {
        return Err(DatabaseError::EmptyPool);
    }
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    Ok(pool)
}

/// Applies every entry of [`MIGRATIONS`] in order.
///
/// This is a blocking operation that should be called from `spawn_blocking`
/// or a synchronous context.
///
/// # Errors
///
/// Returns [`DatabaseError`] when a connection cannot be obtained or a script
/// fails.
pub fn apply_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut connection = pool.get()?;
    for &(name, sql) in MIGRATIONS {
        connection
            .batch_execute(sql)
            .map_err(|source| DatabaseError::Migration { name, source })?;
        tracing::info!(migration = name, "applied migration");
    }
    Ok(())
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &PgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
