//! Offer lifecycle for SkillConnect.
//!
//! An organization issues an offer to a student for a task; the student
//! accepts or declines it exactly once. Acceptance places the student on the
//! task roster in the same atomic unit as the status change, so the offer and
//! the roster never disagree. The module follows hexagonal architecture:
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
