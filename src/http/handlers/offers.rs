//! Offer issuing, responses, and queries.

use crate::account::AccountId;
use crate::http::{ApiError, AppState};
use crate::offer::{
    domain::{Offer, OfferId},
    services::{IssueOfferRequest, RespondToOfferRequest},
};
use crate::task::domain::TaskId;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/offers`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferBody {
    task_id: Option<String>,
    student_id: Option<String>,
    org_id: Option<String>,
    salary: Option<u64>,
    start_date: Option<String>,
}

/// Response of `POST /api/offers`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferResponse {
    success: bool,
    offer_id: OfferId,
}

/// Body of `POST /api/offers/respond`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondBody {
    offer_id: Option<String>,
    action: Option<String>,
}

/// Response of `POST /api/offers/respond`.
#[derive(Debug, Serialize)]
pub struct RespondResponse {
    success: bool,
    status: &'static str,
}

/// Offer as returned by read endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
    id: OfferId,
    task_id: TaskId,
    student_id: AccountId,
    org_id: AccountId,
    salary: u64,
    start_date: String,
    status: &'static str,
    sent_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

impl From<&Offer> for OfferView {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id(),
            task_id: offer.task_id(),
            student_id: offer.student_id(),
            org_id: offer.org_id(),
            salary: offer.salary().amount(),
            start_date: offer.start_date().as_str().to_owned(),
            status: offer.status().as_str(),
            sent_at: offer.sent_at(),
            responded_at: offer.responded_at(),
        }
    }
}

/// Renders offers for a list response.
pub(crate) fn offer_views(offers: &[Offer]) -> Vec<OfferView> {
    offers.iter().map(OfferView::from).collect()
}

/// Issues an offer.
pub async fn create_offer(
    State(state): State<AppState>,
    payload: Result<Json<CreateOfferBody>, JsonRejection>,
) -> Result<Json<CreateOfferResponse>, ApiError> {
    let Json(body) = payload?;
    let offer = state
        .offers
        .issue(IssueOfferRequest {
            task_id: body.task_id,
            student_id: body.student_id,
            org_id: body.org_id,
            salary: body.salary,
            start_date: body.start_date,
        })
        .await?;

    Ok(Json(CreateOfferResponse {
        success: true,
        offer_id: offer.id(),
    }))
}

/// Accepts or declines an offer.
pub async fn respond_to_offer(
    State(state): State<AppState>,
    payload: Result<Json<RespondBody>, JsonRejection>,
) -> Result<Json<RespondResponse>, ApiError> {
    let Json(body) = payload?;
    let response = state
        .offers
        .respond(RespondToOfferRequest {
            offer_id: body.offer_id,
            action: body.action,
        })
        .await?;

    Ok(Json(RespondResponse {
        success: true,
        status: response.offer.status().as_str(),
    }))
}

/// Returns one offer.
pub async fn get_offer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<OfferView>, ApiError> {
    let offer_id = OfferId::parse(&raw_id)
        .map_err(|_| ApiError::bad_request(format!("invalid offer id '{raw_id}'")))?;
    let offer = state.offers.find_by_id(offer_id).await?;
    Ok(Json(OfferView::from(&offer)))
}

/// Lists the offers sent to a student, newest first.
pub async fn list_student_offers(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<OfferView>>, ApiError> {
    let student_id = AccountId::parse(&raw_id)
        .map_err(|_| ApiError::bad_request(format!("invalid student id '{raw_id}'")))?;
    let offers = state.offers.offers_for_student(student_id).await?;
    Ok(Json(offer_views(&offers)))
}
