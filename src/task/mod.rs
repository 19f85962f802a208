//! Task posting and roster management for SkillConnect.
//!
//! Organizations post tasks; accepted offers place students on a task's
//! roster. The roster is a duplicate-free set and every addition marks the
//! task `active`. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
