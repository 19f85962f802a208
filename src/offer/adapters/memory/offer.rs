//! In-memory repository for offers, used by tests and database-less runs.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::AccountId;
use crate::offer::{
    domain::{Offer, OfferId, OfferStatus},
    ports::{OfferRepository, OfferRepositoryError, OfferRepositoryResult},
};
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::{AssignmentOutcome, TaskAssignment};

/// Thread-safe in-memory offer repository.
///
/// Shares task state with an [`InMemoryTaskRepository`] so that responses and
/// roster updates commit under one critical section. Lock order is always
/// offers, then tasks.
#[derive(Debug, Clone)]
pub struct InMemoryOfferRepository {
    offers: Arc<RwLock<HashMap<OfferId, Offer>>>,
    tasks: InMemoryTaskRepository,
}

impl InMemoryOfferRepository {
    /// Creates an empty repository that assigns students through `tasks`.
    #[must_use]
    pub fn new(tasks: InMemoryTaskRepository) -> Self {
        Self {
            offers: Arc::default(),
            tasks,
        }
    }
}

fn newest_first(mut offers: Vec<Offer>) -> Vec<Offer> {
    offers.sort_by_key(|offer| Reverse(offer.sent_at()));
    offers
}

#[async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn store(&self, offer: &Offer) -> OfferRepositoryResult<()> {
        let mut offers = self.offers.write().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if offers.contains_key(&offer.id()) {
            return Err(OfferRepositoryError::DuplicateOffer(offer.id()));
        }
        offers.insert(offer.id(), offer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OfferId) -> OfferRepositoryResult<Option<Offer>> {
        let offers = self.offers.read().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(offers.get(&id).cloned())
    }

    async fn find_by_student(&self, student_id: AccountId) -> OfferRepositoryResult<Vec<Offer>> {
        let offers = self.offers.read().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(newest_first(
            offers
                .values()
                .filter(|offer| offer.student_id() == student_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> OfferRepositoryResult<Vec<Offer>> {
        let offers = self.offers.read().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(newest_first(offers.values().cloned().collect()))
    }

    async fn record_response(
        &self,
        offer: &Offer,
        assignment: Option<TaskAssignment>,
    ) -> OfferRepositoryResult<Option<AssignmentOutcome>> {
        let mut offers = self.offers.write().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = offers
            .get(&offer.id())
            .ok_or(OfferRepositoryError::NotFound(offer.id()))?;
        if stored.status() != OfferStatus::Sent {
            return Err(OfferRepositoryError::StatusConflict(offer.id()));
        }

        // The roster update goes first so a failure leaves the offer untouched.
        let outcome = assignment
            .map(|pending| {
                let at = offer.responded_at().unwrap_or_else(chrono::Utc::now);
                self.tasks
                    .apply_assignment(pending, at)
                    .map_err(OfferRepositoryError::persistence)
            })
            .transpose()?;

        offers.insert(offer.id(), offer.clone());
        Ok(outcome)
    }
}
