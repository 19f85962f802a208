//! Profile bootstrapping for newly signed-in accounts.
//!
//! On first login a student or organization user receives a minimal profile
//! row carrying a public `SC-XXXXXX` identifier, and their account is flagged
//! as needing onboarding. Bootstrapping is fail-open: storage failures are
//! logged and the caller still reaches onboarding.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
