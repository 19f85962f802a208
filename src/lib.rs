//! SkillConnect: offer lifecycle and task assignment for a student task
//! marketplace.
//!
//! Organizations post tasks and send offers to students. A student accepts
//! or declines each offer once; acceptance places the student on the task's
//! roster in the same atomic unit as the status change. First-login profile
//! bootstrapping and a server-verified admin gate complete the service.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration used by the HTTP layer
//!
//! # Modules
//!
//! - [`offer`]: Offer issuing, guarded responses, and queries
//! - [`task`]: Task posting and duplicate-free roster updates
//! - [`profile`]: First-login profile bootstrapping and SkillConnect IDs
//! - [`admin`]: Admin secret comparison and signed session tokens
//! - [`http`]: JSON routes over the services

pub mod account;
pub mod admin;
pub mod config;
pub mod database;
pub mod http;
pub mod offer;
pub mod profile;
pub mod task;
pub mod telemetry;
