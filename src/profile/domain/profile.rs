//! Role-specific profile rows created at first login.

use super::{ProfileDomainError, SkillConnectId};
use crate::account::{AccountId, AccountRole};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Kind of profile an account owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Student profile.
    Student,
    /// Organization profile.
    Organization,
}

impl ProfileKind {
    /// Returns the profile kind for a role, or `None` for roles without a
    /// profile.
    #[must_use]
    pub const fn for_role(role: AccountRole) -> Option<Self> {
        match role {
            AccountRole::Student => Some(Self::Student),
            AccountRole::OrganizationUser => Some(Self::Organization),
            AccountRole::Admin => None,
        }
    }

    /// Returns the canonical token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Organization => "organization",
        }
    }

    /// Route that walks a new account through profile completion.
    #[must_use]
    pub const fn onboarding_path(self) -> &'static str {
        match self {
            Self::Student => "/onboarding/student",
            Self::Organization => "/onboarding/organization",
        }
    }

    /// Landing route for an account that already has a profile.
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Student => "/dashboard/student",
            Self::Organization => "/dashboard/organization",
        }
    }
}

/// Completeness score between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileStrength(u8);

impl ProfileStrength {
    /// Strength of a freshly bootstrapped profile.
    pub const ZERO: Self = Self(0);

    /// Creates a strength score.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::StrengthOutOfRange`] outside 0..=100.
    pub fn new(value: i64) -> Result<Self, ProfileDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|score| *score <= 100)
            .map(Self)
            .ok_or(ProfileDomainError::StrengthOutOfRange(value))
    }

    /// Returns the score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Optional sign-up metadata supplied by the authentication provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountMetadata {
    /// Student's full name.
    pub full_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Organization name.
    pub organization_name: Option<String>,
}

/// Profile row owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    user_id: AccountId,
    kind: ProfileKind,
    skillconnect_id: SkillConnectId,
    profile_strength: ProfileStrength,
    display_name: Option<String>,
    contact_email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Owning account.
    pub user_id: AccountId,
    /// Profile kind.
    pub kind: ProfileKind,
    /// Stored public identifier.
    pub skillconnect_id: SkillConnectId,
    /// Stored strength score.
    pub profile_strength: ProfileStrength,
    /// Full name or organization name.
    pub display_name: Option<String>,
    /// Contact email address.
    pub contact_email: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Builds the minimal profile created at first login.
    #[must_use]
    pub fn bootstrap(
        user_id: AccountId,
        kind: ProfileKind,
        metadata: &AccountMetadata,
        clock: &impl Clock,
    ) -> Self {
        let display_name = match kind {
            ProfileKind::Student => metadata.full_name.clone(),
            ProfileKind::Organization => metadata.organization_name.clone(),
        };
        let now = clock.utc();
        Self {
            user_id,
            kind,
            skillconnect_id: SkillConnectId::from_account(user_id),
            profile_strength: ProfileStrength::ZERO,
            display_name: display_name.filter(|name| !name.trim().is_empty()),
            contact_email: metadata.email.clone().filter(|email| !email.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            user_id: data.user_id,
            kind: data.kind,
            skillconnect_id: data.skillconnect_id,
            profile_strength: data.profile_strength,
            display_name: data.display_name,
            contact_email: data.contact_email,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn user_id(&self) -> AccountId {
        self.user_id
    }

    /// Returns the profile kind.
    #[must_use]
    pub const fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// Returns the public identifier.
    #[must_use]
    pub const fn skillconnect_id(&self) -> &SkillConnectId {
        &self.skillconnect_id
    }

    /// Returns the strength score.
    #[must_use]
    pub const fn profile_strength(&self) -> ProfileStrength {
        self.profile_strength
    }

    /// Returns the full name or organization name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the contact email address.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
