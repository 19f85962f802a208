//! Offer aggregate root, its status vocabulary, and response actions.

use super::{
    OfferDomainError, OfferId, ParseOfferActionError, ParseOfferStatusError, Salary, StartDate,
};
use crate::account::AccountId;
use crate::task::domain::{TaskAssignment, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Offer lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Issued and awaiting the student's response.
    Sent,
    /// Accepted by the student.
    Accepted,
    /// Declined by the student.
    Declined,
    /// Lapsed without a response. Stored and displayed, never produced here.
    Expired,
}

impl OfferStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }

    /// Returns `true` when moving from `self` to `target` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Sent, Self::Accepted | Self::Declined)
        )
    }
}

impl TryFrom<&str> for OfferStatus {
    type Error = ParseOfferStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "sent" => Ok(Self::Sent),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseOfferStatusError(value.to_owned())),
        }
    }
}

/// Student response to an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferAction {
    /// Accept the offer.
    Accept,
    /// Decline the offer.
    Decline,
}

impl OfferAction {
    /// Returns the wire token for the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
        }
    }

    /// Returns the status the action moves an offer to.
    #[must_use]
    pub const fn target_status(self) -> OfferStatus {
        match self {
            Self::Accept => OfferStatus::Accepted,
            Self::Decline => OfferStatus::Declined,
        }
    }
}

impl TryFrom<&str> for OfferAction {
    type Error = ParseOfferActionError;

    /// Parses the exact tokens `accept` and `decline`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "accept" => Ok(Self::Accept),
            "decline" => Ok(Self::Decline),
            _ => Err(ParseOfferActionError(value.to_owned())),
        }
    }
}

/// Validated terms for issuing an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferTerms {
    /// Task the offer is for.
    pub task_id: TaskId,
    /// Student receiving the offer.
    pub student_id: AccountId,
    /// Organization issuing the offer.
    pub org_id: AccountId,
    /// Offered salary.
    pub salary: Salary,
    /// Proposed start date.
    pub start_date: StartDate,
}

/// Offer aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    id: OfferId,
    task_id: TaskId,
    student_id: AccountId,
    org_id: AccountId,
    salary: Salary,
    start_date: StartDate,
    status: OfferStatus,
    sent_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOfferData {
    /// Persisted offer identifier.
    pub id: OfferId,
    /// Referenced task.
    pub task_id: TaskId,
    /// Referenced student.
    pub student_id: AccountId,
    /// Referenced organization.
    pub org_id: AccountId,
    /// Offered salary.
    pub salary: Salary,
    /// Proposed start date.
    pub start_date: StartDate,
    /// Persisted status.
    pub status: OfferStatus,
    /// Issue timestamp.
    pub sent_at: DateTime<Utc>,
    /// Response timestamp, if the student has responded.
    pub responded_at: Option<DateTime<Utc>>,
}

impl Offer {
    /// Issues a new offer in the `sent` status.
    #[must_use]
    pub fn issue(terms: OfferTerms, clock: &impl Clock) -> Self {
        let OfferTerms {
            task_id,
            student_id,
            org_id,
            salary,
            start_date,
        } = terms;
        Self {
            id: OfferId::new(),
            task_id,
            student_id,
            org_id,
            salary,
            start_date,
            status: OfferStatus::Sent,
            sent_at: clock.utc(),
            responded_at: None,
        }
    }

    /// Reconstructs an offer from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOfferData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            student_id: data.student_id,
            org_id: data.org_id,
            salary: data.salary,
            start_date: data.start_date,
            status: data.status,
            sent_at: data.sent_at,
            responded_at: data.responded_at,
        }
    }

    /// Returns the offer identifier.
    #[must_use]
    pub const fn id(&self) -> OfferId {
        self.id
    }

    /// Returns the referenced task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the referenced student.
    #[must_use]
    pub const fn student_id(&self) -> AccountId {
        self.student_id
    }

    /// Returns the issuing organization.
    #[must_use]
    pub const fn org_id(&self) -> AccountId {
        self.org_id
    }

    /// Returns the offered salary.
    #[must_use]
    pub const fn salary(&self) -> Salary {
        self.salary
    }

    /// Returns the proposed start date.
    #[must_use]
    pub const fn start_date(&self) -> &StartDate {
        &self.start_date
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> OfferStatus {
        self.status
    }

    /// Returns the issue timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns the response timestamp, if any.
    #[must_use]
    pub const fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    /// Applies the student's response and stamps `responded_at`.
    ///
    /// # Errors
    ///
    /// Returns [`OfferDomainError::InvalidStatusTransition`] when the offer
    /// has already been responded to. The offer is left unchanged.
    pub fn respond(
        &mut self,
        action: OfferAction,
        clock: &impl Clock,
    ) -> Result<OfferStatus, OfferDomainError> {
        let target = action.target_status();
        if !self.status.can_transition_to(target) {
            return Err(OfferDomainError::InvalidStatusTransition {
                offer_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.responded_at = Some(clock.utc());
        Ok(target)
    }

    /// Returns the roster assignment implied by an accepted offer.
    #[must_use]
    pub const fn assignment(&self) -> Option<TaskAssignment> {
        match self.status {
            OfferStatus::Accepted => Some(TaskAssignment::new(self.task_id, self.student_id)),
            OfferStatus::Sent | OfferStatus::Declined | OfferStatus::Expired => None,
        }
    }
}
