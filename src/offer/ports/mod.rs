//! Port contracts for offer persistence.

pub mod repository;

pub use repository::{OfferRepository, OfferRepositoryError, OfferRepositoryResult};
