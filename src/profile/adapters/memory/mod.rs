//! In-memory adapters for profiles and account flags.

mod profile;

pub use profile::{InMemoryAccountDirectory, InMemoryProfileRepository};
