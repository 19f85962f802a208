//! Step definitions for offer lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
