//! SkillConnect HTTP server.
//!
//! Serves the offer, task, profile, and admin routes. State lives in
//! `PostgreSQL` when `--database-url` is given and in memory otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use mockable::DefaultClock;
use skillconnect::{
    admin::AdminGate,
    config::AppConfig,
    database::{apply_migrations, build_pool},
    http::{AppState, router},
    telemetry::init_tracing,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_tracing(config.log_format).context("failed to initialise tracing")?;

    let admin = AdminGate::new(config.admin_gate_config(), Arc::new(DefaultClock))
        .context("invalid admin gate configuration")?;

    let state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = build_pool(url, config.db_pool_size)
                .context("failed to build the database pool")?;
            if config.apply_migrations {
                let migration_pool = pool.clone();
                tokio::task::spawn_blocking(move || apply_migrations(&migration_pool))
                    .await
                    .context("migration task panicked")?
                    .context("failed to apply migrations")?;
            }
            tracing::info!(pool_size = config.db_pool_size, "using PostgreSQL store");
            AppState::postgres(&pool, admin)
        }
        None => {
            tracing::warn!("no database URL configured; state is kept in memory");
            AppState::in_memory(admin)
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(address = %config.bind, "SkillConnect server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
