//! Domain model for account profiles.

mod error;
mod profile;
mod skillconnect_id;

pub use error::ProfileDomainError;
pub use profile::{AccountMetadata, PersistedProfileData, Profile, ProfileKind, ProfileStrength};
pub use skillconnect_id::SkillConnectId;
