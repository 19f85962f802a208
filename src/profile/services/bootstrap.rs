//! First-login profile bootstrapping.

use crate::account::{AccountId, AccountRole, ParseAccountRoleError};
use crate::profile::{
    domain::{AccountMetadata, Profile, ProfileDomainError, ProfileKind, SkillConnectId},
    ports::{AccountDirectory, ProfileRepository, ProfileRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload received after sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapRequest {
    /// Signed-in account.
    pub account_id: Option<String>,
    /// Role claimed at sign-in.
    pub role: Option<String>,
    /// Sign-up metadata from the authentication provider.
    pub metadata: AccountMetadata,
}

impl BootstrapRequest {
    /// Creates a request with empty metadata.
    #[must_use]
    pub fn new(account_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            role: Some(role.into()),
            metadata: AccountMetadata::default(),
        }
    }

    /// Attaches sign-up metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: AccountMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Result of [`ProfileBootstrapService::ensure_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The role carries no profile.
    Skipped(AccountRole),
    /// A profile already existed and was left untouched.
    Existing(Profile),
    /// A new profile was created and onboarding is pending.
    Created(Profile),
}

/// Where the client should go after sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingDecision {
    /// Client route to redirect to.
    pub redirect: &'static str,
    /// Public identifier, when a profile is known.
    pub skillconnect_id: Option<SkillConnectId>,
}

impl OnboardingDecision {
    const ADMIN_HOME: &'static str = "/admin";

    /// Existing profiles reach the dashboard only once `onboarded` is set.
    fn from_outcome(outcome: &BootstrapOutcome, onboarded: bool) -> Self {
        match outcome {
            BootstrapOutcome::Skipped(_) => Self {
                redirect: Self::ADMIN_HOME,
                skillconnect_id: None,
            },
            BootstrapOutcome::Existing(profile) => Self {
                redirect: if onboarded {
                    profile.kind().dashboard_path()
                } else {
                    profile.kind().onboarding_path()
                },
                skillconnect_id: Some(profile.skillconnect_id().clone()),
            },
            BootstrapOutcome::Created(profile) => Self {
                redirect: profile.kind().onboarding_path(),
                skillconnect_id: Some(profile.skillconnect_id().clone()),
            },
        }
    }
}

/// Service-level errors for profile bootstrapping.
#[derive(Debug, Error)]
pub enum ProfileBootstrapError {
    /// Input was missing or malformed.
    #[error(transparent)]
    Validation(#[from] ProfileDomainError),
    /// The role token is not recognized.
    #[error(transparent)]
    InvalidRole(#[from] ParseAccountRoleError),
    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

/// Result type for profile bootstrap operations.
pub type ProfileBootstrapResult<T> = Result<T, ProfileBootstrapError>;

/// Creates first-login profiles and decides the post-login route.
pub struct ProfileBootstrapService<P, A, C>
where
    P: ProfileRepository + ?Sized,
    A: AccountDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    profiles: Arc<P>,
    accounts: Arc<A>,
    clock: Arc<C>,
}

impl<P, A, C> ProfileBootstrapService<P, A, C>
where
    P: ProfileRepository + ?Sized,
    A: AccountDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new bootstrap service.
    #[must_use]
    pub const fn new(profiles: Arc<P>, accounts: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            profiles,
            accounts,
            clock,
        }
    }

    /// Ensures the account owns a profile matching its role.
    ///
    /// A new profile gets a derived SkillConnect ID and strength 0, and the
    /// account is flagged as not yet onboarded. An insert that loses a race
    /// to a concurrent bootstrap reports the surviving profile as existing.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileBootstrapError::Repository`] when storage fails.
    pub async fn ensure_profile(
        &self,
        account: AccountId,
        role: AccountRole,
        metadata: &AccountMetadata,
    ) -> ProfileBootstrapResult<BootstrapOutcome> {
        let Some(kind) = ProfileKind::for_role(role) else {
            return Ok(BootstrapOutcome::Skipped(role));
        };
        if let Some(existing) = self.profiles.find(account, kind).await? {
            return Ok(BootstrapOutcome::Existing(existing));
        }

        let profile = Profile::bootstrap(account, kind, metadata, &*self.clock);
        if !self.profiles.insert_if_absent(&profile).await? {
            let winner = self.profiles.find(account, kind).await?;
            return Ok(BootstrapOutcome::Existing(winner.unwrap_or(profile)));
        }
        self.accounts
            .set_profile_complete(account, false, profile.created_at())
            .await?;

        tracing::info!(
            account_id = %account,
            kind = kind.as_str(),
            skillconnect_id = %profile.skillconnect_id(),
            "profile bootstrapped"
        );
        Ok(BootstrapOutcome::Created(profile))
    }

    /// Bootstraps on sign-in and decides where to send the caller.
    ///
    /// A returning account is sent to its dashboard only when its
    /// `profile_complete` flag is set; otherwise it goes back to onboarding.
    /// Storage failures are logged and the caller is still sent to
    /// onboarding.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileBootstrapError::Validation`] or
    /// [`ProfileBootstrapError::InvalidRole`] for malformed input only.
    pub async fn bootstrap_on_login(
        &self,
        request: BootstrapRequest,
    ) -> ProfileBootstrapResult<OnboardingDecision> {
        let (account, role) = parse_identity(request.account_id, request.role)?;

        let outcome = match self.ensure_profile(account, role, &request.metadata).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    account_id = %account,
                    role = role.as_str(),
                    error = %err,
                    "profile bootstrap failed; continuing to onboarding"
                );
                let redirect = ProfileKind::for_role(role)
                    .map_or(OnboardingDecision::ADMIN_HOME, ProfileKind::onboarding_path);
                return Ok(OnboardingDecision {
                    redirect,
                    skillconnect_id: None,
                });
            }
        };

        let onboarded = match &outcome {
            BootstrapOutcome::Existing(_) => self.is_onboarded(account).await,
            BootstrapOutcome::Skipped(_) | BootstrapOutcome::Created(_) => false,
        };
        Ok(OnboardingDecision::from_outcome(&outcome, onboarded))
    }

    /// Marks the account's onboarding as finished.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileBootstrapError::Repository`] when storage fails.
    pub async fn complete_onboarding(&self, account: AccountId) -> ProfileBootstrapResult<()> {
        self.accounts
            .set_profile_complete(account, true, self.clock.utc())
            .await?;
        tracing::info!(account_id = %account, "onboarding completed");
        Ok(())
    }

    /// Returns every profile carrying the given SkillConnect ID.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileBootstrapError::Validation`] for a malformed
    /// identifier and [`ProfileBootstrapError::Repository`] when storage
    /// fails.
    pub async fn find_by_skillconnect_id(
        &self,
        raw: &str,
    ) -> ProfileBootstrapResult<Vec<Profile>> {
        let skillconnect_id = SkillConnectId::parse(raw)?;
        Ok(self
            .profiles
            .find_by_skillconnect_id(&skillconnect_id)
            .await?)
    }

    /// Returns the account's onboarding flag, if recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileBootstrapError::Repository`] when storage fails.
    pub async fn profile_complete(
        &self,
        account: AccountId,
    ) -> ProfileBootstrapResult<Option<bool>> {
        Ok(self.accounts.profile_complete(account).await?)
    }

    /// Reads the onboarding flag, treating an absent or unreadable flag as
    /// not onboarded.
    async fn is_onboarded(&self, account: AccountId) -> bool {
        match self.accounts.profile_complete(account).await {
            Ok(flag) => flag == Some(true),
            Err(err) => {
                tracing::error!(
                    account_id = %account,
                    error = %err,
                    "onboarding flag lookup failed; continuing to onboarding"
                );
                false
            }
        }
    }
}

fn parse_identity(
    account_id: Option<String>,
    role: Option<String>,
) -> ProfileBootstrapResult<(AccountId, AccountRole)> {
    let given_account = account_id.filter(|raw| !raw.trim().is_empty());
    let given_role = role.filter(|raw| !raw.trim().is_empty());
    let (Some(raw_account), Some(raw_role)) = (given_account.as_deref(), given_role.as_deref())
    else {
        let mut missing = Vec::new();
        if given_account.is_none() {
            missing.push("accountId");
        }
        if given_role.is_none() {
            missing.push("role");
        }
        return Err(ProfileDomainError::MissingFields(missing).into());
    };

    let account = AccountId::parse(raw_account)
        .map_err(|_| ProfileDomainError::InvalidAccountId(raw_account.to_owned()))?;
    Ok((account, AccountRole::try_from(raw_role)?))
}
