//! Domain model for offers.
//!
//! Offers move forward only: `sent` to `accepted` or `declined`. `expired`
//! is part of the stored vocabulary but no operation produces it yet.

mod error;
mod ids;
mod offer;
mod terms;

pub use error::{OfferDomainError, ParseOfferActionError, ParseOfferStatusError};
pub use ids::OfferId;
pub use offer::{Offer, OfferAction, OfferStatus, OfferTerms, PersistedOfferData};
pub use terms::{Salary, StartDate};
