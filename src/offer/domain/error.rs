//! Error types for offer domain validation and parsing.

use super::{OfferId, OfferStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning offers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OfferDomainError {
    /// One or more required request fields were absent or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// An identifier could not be parsed.
    #[error("invalid {field} '{value}', expected a UUID")]
    InvalidIdentifier {
        /// Request field holding the identifier.
        field: &'static str,
        /// Raw value supplied by the caller.
        value: String,
    },

    /// The salary does not fit the stored range.
    #[error("salary {0} exceeds the maximum of {max}", max = i64::MAX)]
    SalaryOutOfRange(u64),

    /// The start date is empty after trimming.
    #[error("start date must not be empty")]
    EmptyStartDate,

    /// The requested status change is not permitted from the current status.
    #[error("offer {offer_id} cannot move from {} to {}", from.as_str(), to.as_str())]
    InvalidStatusTransition {
        /// Offer being transitioned.
        offer_id: OfferId,
        /// Current status.
        from: OfferStatus,
        /// Requested status.
        to: OfferStatus,
    },
}

/// Error returned for action tokens other than `accept` and `decline`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid action '{0}', expected 'accept' or 'decline'")]
pub struct ParseOfferActionError(pub String);

/// Error returned while parsing offer statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown offer status: {0}")]
pub struct ParseOfferStatusError(pub String);
