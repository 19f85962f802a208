//! Error types for profile validation.

use thiserror::Error;

/// Errors returned while validating profile input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// One or more required request fields were absent or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The account identifier could not be parsed.
    #[error("invalid accountId '{0}', expected a UUID")]
    InvalidAccountId(String),

    /// The account key has too few characters to derive an identifier.
    #[error("account key '{0}' has fewer than six alphanumeric characters")]
    AccountKeyTooShort(String),

    /// The value is not of the form `SC-XXXXXX`.
    #[error("invalid SkillConnect ID '{0}'")]
    InvalidSkillConnectId(String),

    /// Profile strength must lie between 0 and 100.
    #[error("profile strength {0} is outside 0..=100")]
    StrengthOutOfRange(i64),
}
