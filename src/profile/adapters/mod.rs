//! Adapter implementations for profile storage.

pub mod memory;
pub mod postgres;
