//! In-memory adapters for offer persistence.

mod offer;

pub use offer::InMemoryOfferRepository;
