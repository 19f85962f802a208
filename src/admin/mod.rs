//! Server-verified admin access.
//!
//! The admin secret is compared on the server and exchanged for a signed,
//! expiring session token. Admin routes verify that token on every request;
//! nothing stored on the client is trusted.

mod gate;

pub use gate::{AdminAuthError, AdminClaims, AdminGate, AdminGateConfig, AdminSession};
