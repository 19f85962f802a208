//! Public, human-readable account identifier.

use super::ProfileDomainError;
use crate::account::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

const PREFIX: &str = "SC-";
const SUFFIX_LEN: usize = 6;

/// Identifier of the form `SC-XXXXXX` shown on profiles.
///
/// The suffix is the last six alphanumeric characters of the account
/// identifier, uppercased. Derivation is deterministic, but distinct accounts
/// may share a suffix, so the identifier is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillConnectId(String);

impl SkillConnectId {
    /// Derives the identifier for an account.
    #[must_use]
    pub fn from_account(account: AccountId) -> Self {
        let key = account.into_inner().simple().to_string();
        Self(format!("{PREFIX}{}", suffix_of(&key)))
    }

    /// Derives the identifier from an arbitrary account key.
    ///
    /// Separators and other non-alphanumeric characters are dropped before
    /// the tail is taken.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::AccountKeyTooShort`] when fewer than six
    /// alphanumeric characters remain.
    pub fn from_account_key(key: &str) -> Result<Self, ProfileDomainError> {
        let suffix = suffix_of(key);
        if suffix.chars().count() < SUFFIX_LEN {
            return Err(ProfileDomainError::AccountKeyTooShort(key.to_owned()));
        }
        Ok(Self(format!("{PREFIX}{suffix}")))
    }

    /// Parses a stored or user-supplied identifier.
    ///
    /// Lowercase input is accepted and normalized.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::InvalidSkillConnectId`] when the value
    /// is not `SC-` followed by six alphanumeric characters.
    pub fn parse(value: &str) -> Result<Self, ProfileDomainError> {
        let normalized = value.trim().to_ascii_uppercase();
        let valid = normalized.strip_prefix(PREFIX).is_some_and(|suffix| {
            suffix.chars().count() == SUFFIX_LEN
                && suffix.chars().all(|ch| ch.is_ascii_alphanumeric())
        });
        if !valid {
            return Err(ProfileDomainError::InvalidSkillConnectId(value.to_owned()));
        }
        Ok(Self(normalized))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillConnectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn suffix_of(key: &str) -> String {
    let mut tail: Vec<char> = key
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .rev()
        .take(SUFFIX_LEN)
        .collect();
    tail.reverse();
    tail.into_iter().map(|ch| ch.to_ascii_uppercase()).collect()
}
