//! Service layer for issuing offers and recording student responses.

use crate::account::AccountId;
use crate::offer::{
    domain::{
        Offer, OfferAction, OfferDomainError, OfferId, OfferTerms, ParseOfferActionError, Salary,
        StartDate,
    },
    ports::{OfferRepository, OfferRepositoryError},
};
use crate::task::domain::{AssignmentOutcome, TaskId};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for issuing an offer.
///
/// Every field is required; absent or blank values are reported together as
/// [`OfferDomainError::MissingFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueOfferRequest {
    /// Task the offer is for.
    pub task_id: Option<String>,
    /// Student receiving the offer.
    pub student_id: Option<String>,
    /// Organization issuing the offer.
    pub org_id: Option<String>,
    /// Offered salary.
    pub salary: Option<u64>,
    /// Proposed start date.
    pub start_date: Option<String>,
}

impl IssueOfferRequest {
    /// Creates a request with every field present.
    #[must_use]
    pub fn new(
        task_id: impl Into<String>,
        student_id: impl Into<String>,
        org_id: impl Into<String>,
        salary: u64,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            task_id: Some(task_id.into()),
            student_id: Some(student_id.into()),
            org_id: Some(org_id.into()),
            salary: Some(salary),
            start_date: Some(start_date.into()),
        }
    }

    fn into_terms(self) -> Result<OfferTerms, OfferDomainError> {
        let mut missing = Vec::new();
        let task_id = present(self.task_id, "taskId", &mut missing);
        let student_id = present(self.student_id, "studentId", &mut missing);
        let org_id = present(self.org_id, "orgId", &mut missing);
        if self.salary.is_none() {
            missing.push("salary");
        }
        let start_date = present(self.start_date, "startDate", &mut missing);

        let (Some(task_id), Some(student_id), Some(org_id), Some(salary), Some(start_date)) =
            (task_id, student_id, org_id, self.salary, start_date)
        else {
            return Err(OfferDomainError::MissingFields(missing));
        };

        Ok(OfferTerms {
            task_id: TaskId::parse(&task_id).map_err(|_| invalid_id("taskId", task_id.clone()))?,
            student_id: AccountId::parse(&student_id)
                .map_err(|_| invalid_id("studentId", student_id.clone()))?,
            org_id: AccountId::parse(&org_id).map_err(|_| invalid_id("orgId", org_id.clone()))?,
            salary: Salary::new(salary)?,
            start_date: StartDate::new(start_date)?,
        })
    }
}

/// Request payload for accepting or declining an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RespondToOfferRequest {
    /// Offer being responded to.
    pub offer_id: Option<String>,
    /// Action token, `accept` or `decline`.
    pub action: Option<String>,
}

impl RespondToOfferRequest {
    /// Creates a request with both fields present.
    #[must_use]
    pub fn new(offer_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            offer_id: Some(offer_id.into()),
            action: Some(action.into()),
        }
    }
}

/// Successful outcome of [`OfferLifecycleService::respond`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferResponse {
    /// The offer after the response was recorded.
    pub offer: Offer,
    /// Roster outcome when the offer was accepted.
    pub assignment: Option<AssignmentOutcome>,
}

/// Service-level errors for offer operations.
#[derive(Debug, Error)]
pub enum OfferLifecycleError {
    /// Input was missing or malformed.
    #[error(transparent)]
    Validation(#[from] OfferDomainError),
    /// The action token was neither `accept` nor `decline`.
    #[error(transparent)]
    InvalidAction(#[from] ParseOfferActionError),
    /// The referenced offer does not exist.
    #[error("offer not found: {0}")]
    NotFound(OfferId),
    /// The offer has already been responded to.
    #[error("offer {0} has already been responded to")]
    Conflict(OfferId),
    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] OfferRepositoryError),
}

/// Result type for offer service operations.
pub type OfferLifecycleResult<T> = Result<T, OfferLifecycleError>;

/// Offer issuing and response orchestration service.
pub struct OfferLifecycleService<R, C>
where
    R: OfferRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> OfferLifecycleService<R, C>
where
    R: OfferRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new offer lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Issues an offer in the `sent` status.
    ///
    /// # Errors
    ///
    /// Returns [`OfferLifecycleError::Validation`] when a field is missing or
    /// malformed, and [`OfferLifecycleError::Storage`] when the insert fails.
    pub async fn issue(&self, request: IssueOfferRequest) -> OfferLifecycleResult<Offer> {
        let terms = request.into_terms()?;
        let offer = Offer::issue(terms, &*self.clock);
        self.repository.store(&offer).await?;
        tracing::info!(
            offer_id = %offer.id(),
            task_id = %offer.task_id(),
            student_id = %offer.student_id(),
            org_id = %offer.org_id(),
            "offer issued"
        );
        Ok(offer)
    }

    /// Accepts or declines an offer.
    ///
    /// The status change is guarded on the offer still being `sent`. On
    /// acceptance the student joins the task roster in the same atomic unit.
    /// A missing task does not fail the response.
    ///
    /// # Errors
    ///
    /// Returns [`OfferLifecycleError::Validation`] for missing fields,
    /// [`OfferLifecycleError::InvalidAction`] for an unknown action,
    /// [`OfferLifecycleError::NotFound`] for an unknown offer,
    /// [`OfferLifecycleError::Conflict`] when the offer was already
    /// responded to, and [`OfferLifecycleError::Storage`] when persistence
    /// fails. No error path writes anything.
    pub async fn respond(
        &self,
        request: RespondToOfferRequest,
    ) -> OfferLifecycleResult<OfferResponse> {
        let mut missing = Vec::new();
        let raw_offer_id = present(request.offer_id, "offerId", &mut missing);
        let raw_action = present(request.action, "action", &mut missing);
        let (Some(raw_offer_id), Some(raw_action)) = (raw_offer_id, raw_action) else {
            return Err(OfferDomainError::MissingFields(missing).into());
        };

        let action = OfferAction::try_from(raw_action.as_str())?;
        let offer_id = OfferId::parse(&raw_offer_id)
            .map_err(|_| invalid_id("offerId", raw_offer_id.clone()))?;

        let mut offer = self
            .repository
            .find_by_id(offer_id)
            .await?
            .ok_or(OfferLifecycleError::NotFound(offer_id))?;

        offer
            .respond(action, &*self.clock)
            .map_err(|err| match err {
                OfferDomainError::InvalidStatusTransition { .. } => {
                    OfferLifecycleError::Conflict(offer_id)
                }
                other => OfferLifecycleError::Validation(other),
            })?;

        let assignment = self
            .repository
            .record_response(&offer, offer.assignment())
            .await
            .map_err(|err| match err {
                OfferRepositoryError::NotFound(id) => OfferLifecycleError::NotFound(id),
                OfferRepositoryError::StatusConflict(id) => OfferLifecycleError::Conflict(id),
                other => OfferLifecycleError::Storage(other),
            })?;

        if assignment == Some(AssignmentOutcome::TaskMissing) {
            tracing::warn!(
                offer_id = %offer_id,
                task_id = %offer.task_id(),
                "offer accepted but task not found; roster left unchanged"
            );
        }
        tracing::info!(
            offer_id = %offer_id,
            action = action.as_str(),
            status = offer.status().as_str(),
            ?assignment,
            "offer responded"
        );

        Ok(OfferResponse { offer, assignment })
    }

    /// Retrieves an offer by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`OfferLifecycleError::NotFound`] when the offer does not
    /// exist and [`OfferLifecycleError::Storage`] when lookup fails.
    pub async fn find_by_id(&self, offer_id: OfferId) -> OfferLifecycleResult<Offer> {
        self.repository
            .find_by_id(offer_id)
            .await?
            .ok_or(OfferLifecycleError::NotFound(offer_id))
    }

    /// Lists the offers sent to a student, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OfferLifecycleError::Storage`] when lookup fails.
    pub async fn offers_for_student(
        &self,
        student_id: AccountId,
    ) -> OfferLifecycleResult<Vec<Offer>> {
        Ok(self.repository.find_by_student(student_id).await?)
    }

    /// Lists every offer, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OfferLifecycleError::Storage`] when lookup fails.
    pub async fn list_all(&self) -> OfferLifecycleResult<Vec<Offer>> {
        Ok(self.repository.list_all().await?)
    }
}

/// Returns the value when present and non-blank, recording `field` otherwise.
fn present(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let kept = value.filter(|raw| !raw.trim().is_empty());
    if kept.is_none() {
        missing.push(field);
    }
    kept
}

const fn invalid_id(field: &'static str, value: String) -> OfferDomainError {
    OfferDomainError::InvalidIdentifier { field, value }
}
