//! Commercial terms carried by an offer.

use super::OfferDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Salary amount in whole currency units.
///
/// Amounts range from zero to [`Salary::MAX`], the largest value the
/// `PostgreSQL` `BIGINT` column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salary(u64);

impl Salary {
    /// Largest amount representable in the `PostgreSQL` schema.
    pub const MAX: u64 = i64::MAX.unsigned_abs();

    /// Creates a salary amount.
    ///
    /// # Errors
    ///
    /// Returns [`OfferDomainError::SalaryOutOfRange`] when `amount` exceeds
    /// [`Salary::MAX`].
    pub const fn new(amount: u64) -> Result<Self, OfferDomainError> {
        if amount > Self::MAX {
            return Err(OfferDomainError::SalaryOutOfRange(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Proposed start date as supplied by the organization.
///
/// The value is opaque: only emptiness is checked, not the date format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StartDate(String);

impl StartDate {
    /// Creates a start date from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`OfferDomainError::EmptyStartDate`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, OfferDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OfferDomainError::EmptyStartDate);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the date as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
