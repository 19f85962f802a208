//! First-login bootstrapping and profile lookup.

use crate::account::AccountId;
use crate::http::{ApiError, AppState};
use crate::profile::{
    domain::{AccountMetadata, Profile, SkillConnectId},
    services::BootstrapRequest,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

/// Sign-up metadata supplied with a bootstrap request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBody {
    full_name: Option<String>,
    email: Option<String>,
    organization_name: Option<String>,
}

/// Body of `POST /api/profiles/bootstrap`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapBody {
    account_id: Option<String>,
    role: Option<String>,
    #[serde(default)]
    metadata: MetadataBody,
}

/// Response of `POST /api/profiles/bootstrap`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapResponse {
    redirect: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    skillconnect_id: Option<SkillConnectId>,
}

/// Body of `POST /api/profiles/onboarding/complete`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOnboardingBody {
    account_id: Option<String>,
}

/// Response of `POST /api/profiles/onboarding/complete`.
#[derive(Debug, Serialize)]
pub struct CompleteOnboardingResponse {
    success: bool,
}

/// Profile as returned by lookup endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    user_id: AccountId,
    kind: &'static str,
    skillconnect_id: SkillConnectId,
    profile_strength: u8,
    display_name: Option<String>,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.user_id(),
            kind: profile.kind().as_str(),
            skillconnect_id: profile.skillconnect_id().clone(),
            profile_strength: profile.profile_strength().value(),
            display_name: profile.display_name().map(str::to_owned),
        }
    }
}

/// Ensures a profile exists for the signed-in account and picks a redirect.
pub async fn bootstrap_profile(
    State(state): State<AppState>,
    payload: Result<Json<BootstrapBody>, JsonRejection>,
) -> Result<Json<BootstrapResponse>, ApiError> {
    let Json(body) = payload?;
    let request = BootstrapRequest {
        account_id: body.account_id,
        role: body.role,
        metadata: AccountMetadata {
            full_name: body.metadata.full_name,
            email: body.metadata.email,
            organization_name: body.metadata.organization_name,
        },
    };
    let decision = state.profiles.bootstrap_on_login(request).await?;

    Ok(Json(BootstrapResponse {
        redirect: decision.redirect,
        skillconnect_id: decision.skillconnect_id,
    }))
}

/// Records that the account finished onboarding.
pub async fn complete_onboarding(
    State(state): State<AppState>,
    payload: Result<Json<CompleteOnboardingBody>, JsonRejection>,
) -> Result<Json<CompleteOnboardingResponse>, ApiError> {
    let Json(body) = payload?;
    let raw_id = body
        .account_id
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("missing required fields: accountId"))?;
    let account = AccountId::parse(&raw_id)
        .map_err(|_| ApiError::bad_request(format!("invalid account id '{raw_id}'")))?;
    state.profiles.complete_onboarding(account).await?;
    Ok(Json(CompleteOnboardingResponse { success: true }))
}

/// Lists profiles carrying a SkillConnect ID. Identifiers may collide.
pub async fn find_by_skillconnect_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<ProfileView>>, ApiError> {
    let profiles = state.profiles.find_by_skillconnect_id(&raw_id).await?;
    Ok(Json(profiles.iter().map(ProfileView::from).collect()))
}
