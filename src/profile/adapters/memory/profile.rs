//! In-memory profile and account-flag stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::AccountId;
use crate::profile::{
    domain::{Profile, ProfileKind, SkillConnectId},
    ports::{AccountDirectory, ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

fn poisoned(err: impl std::fmt::Display) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory profile repository keyed by owner and kind.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<HashMap<(AccountId, ProfileKind), Profile>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(
        &self,
        user_id: AccountId,
        kind: ProfileKind,
    ) -> ProfileRepositoryResult<Option<Profile>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&(user_id, kind)).cloned())
    }

    async fn find_by_skillconnect_id(
        &self,
        skillconnect_id: &SkillConnectId,
    ) -> ProfileRepositoryResult<Vec<Profile>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .values()
            .filter(|profile| profile.skillconnect_id() == skillconnect_id)
            .cloned()
            .collect())
    }

    async fn insert_if_absent(&self, profile: &Profile) -> ProfileRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let key = (profile.user_id(), profile.kind());
        if state.contains_key(&key) {
            return Ok(false);
        }
        state.insert(key, profile.clone());
        Ok(true)
    }
}

/// Thread-safe in-memory account-flag store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountDirectory {
    flags: Arc<RwLock<HashMap<AccountId, bool>>>,
}

impl InMemoryAccountDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn set_profile_complete(
        &self,
        account: AccountId,
        complete: bool,
        _at: DateTime<Utc>,
    ) -> ProfileRepositoryResult<()> {
        let mut flags = self.flags.write().map_err(poisoned)?;
        flags.insert(account, complete);
        Ok(())
    }

    async fn profile_complete(&self, account: AccountId) -> ProfileRepositoryResult<Option<bool>> {
        let flags = self.flags.read().map_err(poisoned)?;
        Ok(flags.get(&account).copied())
    }
}
