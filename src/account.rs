//! Account identity shared by the offer, task, and profile contexts.
//!
//! Accounts are issued by the hosted authentication provider; this crate only
//! carries their identifiers and the role claimed at sign-in.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of an authenticated account (student, organization user, or
/// admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random account identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an account identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses an account identifier from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`uuid::Error`] when the value is not a UUID.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.trim()).map(Self)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role claimed by an account at sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// A student looking for paid tasks.
    Student,
    /// A member of an organization posting tasks.
    OrganizationUser,
    /// A back-office administrator.
    Admin,
}

impl AccountRole {
    /// Returns the canonical role token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::OrganizationUser => "organization_user",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for AccountRole {
    type Error = ParseAccountRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "student" => Ok(Self::Student),
            "organization_user" => Ok(Self::OrganizationUser),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseAccountRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for unrecognized role tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown account role: {0}")]
pub struct ParseAccountRoleError(pub String);
