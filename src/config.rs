//! Command-line and environment configuration for the server binary.

use crate::admin::AdminGateConfig;
use chrono::Duration;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Server configuration. Every flag falls back to an environment variable.
#[derive(Clone, Parser)]
#[command(name = "skillconnect", version, about = "SkillConnect offer workflow server")]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "SKILLCONNECT_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// `PostgreSQL` URL. Without it the server keeps state in memory.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections. Must be at least 1.
    #[arg(
        long,
        env = "SKILLCONNECT_DB_POOL_SIZE",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub db_pool_size: u32,

    /// Shared secret exchanged for an admin session.
    #[arg(long, env = "SKILLCONNECT_ADMIN_SECRET", hide_env_values = true)]
    pub admin_secret: String,

    /// Key used to sign admin session tokens.
    #[arg(long, env = "SKILLCONNECT_SESSION_KEY", hide_env_values = true)]
    pub session_key: String,

    /// Admin session lifetime in seconds.
    #[arg(long, env = "SKILLCONNECT_SESSION_TTL_SECS", default_value_t = 3600)]
    pub session_ttl_secs: u32,

    /// Log output format.
    #[arg(long, env = "SKILLCONNECT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Apply SQL migrations before serving.
    #[arg(long, env = "SKILLCONNECT_APPLY_MIGRATIONS")]
    pub apply_migrations: bool,
}

impl AppConfig {
    /// Builds the admin gate settings from the parsed flags.
    #[must_use]
    pub fn admin_gate_config(&self) -> AdminGateConfig {
        AdminGateConfig {
            admin_secret: self.admin_secret.clone(),
            session_key: self.session_key.clone(),
            session_ttl: Duration::seconds(i64::from(self.session_ttl_secs)),
        }
    }
}
