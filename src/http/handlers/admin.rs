//! Admin session login and gated back-office queries.

use super::offers::{OfferView, offer_views};
use crate::admin::{AdminClaims, AdminGate};
use crate::http::{ApiError, AppState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header::AUTHORIZATION},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/admin/session`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionBody {
    secret: Option<String>,
}

/// Response of `POST /api/admin/session`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges the admin secret for a bearer token.
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<SessionBody>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(body) = payload?;
    let secret = body
        .secret
        .filter(|candidate| !candidate.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing required fields: secret"))?;
    let session = state.admin.login(&secret)?;

    Ok(Json(SessionResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// Lists every offer, newest first. Requires an admin bearer token.
pub async fn list_offers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<OfferView>>, ApiError> {
    let claims = require_admin(&headers, &state.admin)?;
    tracing::debug!(session_id = %claims.session_id, "admin listing offers");
    let offers = state.offers.list_all().await?;
    Ok(Json(offer_views(&offers)))
}

fn require_admin(headers: &HeaderMap, gate: &AdminGate) -> Result<AdminClaims, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("missing admin bearer token"))?;
    Ok(gate.verify(token)?)
}
