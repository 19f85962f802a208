//! Repository port for offer persistence and guarded responses.

use crate::account::AccountId;
use crate::offer::domain::{Offer, OfferId};
use crate::task::domain::{AssignmentOutcome, TaskAssignment};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for offer repository operations.
pub type OfferRepositoryResult<T> = Result<T, OfferRepositoryError>;

/// Offer persistence contract.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Stores a newly issued offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferRepositoryError::DuplicateOffer`] when the offer ID
    /// already exists.
    async fn store(&self, offer: &Offer) -> OfferRepositoryResult<()>;

    /// Finds an offer by identifier.
    ///
    /// Returns `None` when the offer does not exist.
    async fn find_by_id(&self, id: OfferId) -> OfferRepositoryResult<Option<Offer>>;

    /// Returns every offer sent to `student_id`, newest first.
    async fn find_by_student(&self, student_id: AccountId) -> OfferRepositoryResult<Vec<Offer>>;

    /// Returns every offer, newest first.
    async fn list_all(&self) -> OfferRepositoryResult<Vec<Offer>>;

    /// Persists a response already applied to `offer`.
    ///
    /// The write only succeeds if the stored offer is still `sent`. When
    /// `assignment` is present, the roster update runs in the same atomic
    /// unit: either both changes are kept or neither is, and the roster
    /// outcome is returned.
    ///
    /// # Errors
    ///
    /// Returns [`OfferRepositoryError::NotFound`] when the offer does not
    /// exist and [`OfferRepositoryError::StatusConflict`] when it is no
    /// longer `sent`.
    async fn record_response(
        &self,
        offer: &Offer,
        assignment: Option<TaskAssignment>,
    ) -> OfferRepositoryResult<Option<AssignmentOutcome>>;
}

/// Errors returned by offer repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OfferRepositoryError {
    /// An offer with the same identifier already exists.
    #[error("duplicate offer identifier: {0}")]
    DuplicateOffer(OfferId),

    /// The offer was not found.
    #[error("offer not found: {0}")]
    NotFound(OfferId),

    /// The stored offer has already left the `sent` status.
    #[error("offer {0} has already been responded to")]
    StatusConflict(OfferId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OfferRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
