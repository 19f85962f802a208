//! Adapter implementations of the offer ports.

pub mod memory;
pub mod postgres;
