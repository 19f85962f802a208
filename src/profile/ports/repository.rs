//! Repository ports for profiles and account flags.

use crate::account::AccountId;
use crate::profile::domain::{Profile, ProfileKind, SkillConnectId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile and account-flag storage.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds the profile of `kind` owned by `user_id`.
    async fn find(
        &self,
        user_id: AccountId,
        kind: ProfileKind,
    ) -> ProfileRepositoryResult<Option<Profile>>;

    /// Returns every profile carrying `skillconnect_id`.
    ///
    /// Identifiers may collide, so more than one profile can match.
    async fn find_by_skillconnect_id(
        &self,
        skillconnect_id: &SkillConnectId,
    ) -> ProfileRepositoryResult<Vec<Profile>>;

    /// Inserts `profile` unless its owner already has one of that kind.
    ///
    /// Returns `true` when the row was inserted and `false` when an existing
    /// row was kept.
    async fn insert_if_absent(&self, profile: &Profile) -> ProfileRepositoryResult<bool>;
}

/// Account flag persistence contract.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Records whether the account has completed its profile.
    async fn set_profile_complete(
        &self,
        account: AccountId,
        complete: bool,
        at: DateTime<Utc>,
    ) -> ProfileRepositoryResult<()>;

    /// Returns the recorded flag, or `None` when the account has none.
    async fn profile_complete(&self, account: AccountId) -> ProfileRepositoryResult<Option<bool>>;
}

/// Errors returned by profile and account-flag storage.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
