//! `PostgreSQL` adapters for profiles and account flags.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresAccountDirectory, PostgresProfileRepository};
