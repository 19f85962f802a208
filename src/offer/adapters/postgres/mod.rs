//! `PostgreSQL` adapters for offer persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresOfferRepository;
