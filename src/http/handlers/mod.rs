//! Request handlers grouped by resource.

pub mod admin;
pub mod health;
pub mod offers;
pub mod profiles;
pub mod tasks;
