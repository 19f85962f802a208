//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub(crate) use repository::append_assigned_student;
pub use repository::PostgresTaskRepository;
