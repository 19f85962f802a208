//! Task aggregate root and its status vocabulary.

use super::{AssignmentOutcome, ParseTaskStatusError, TaskId, TaskTitle};
use crate::account::AccountId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Posted and waiting for students.
    Open,
    /// At least one student has accepted an offer for the task.
    Active,
    /// Work has been delivered.
    Completed,
    /// Withdrawn by the organization.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    org_id: AccountId,
    title: TaskTitle,
    assigned_students: Vec<AccountId>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning organization account.
    pub org_id: AccountId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted roster, in insertion order.
    pub assigned_students: Vec<AccountId>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Posts a new open task with an empty roster.
    #[must_use]
    pub fn post(org_id: AccountId, title: TaskTitle, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            org_id,
            title,
            assigned_students: Vec::new(),
            status: TaskStatus::Open,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// Duplicate roster entries are collapsed, keeping the first occurrence.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let mut assigned_students: Vec<AccountId> = Vec::with_capacity(data.assigned_students.len());
        for student in data.assigned_students {
            if !assigned_students.contains(&student) {
                assigned_students.push(student);
            }
        }
        Self {
            id: data.id,
            org_id: data.org_id,
            title: data.title,
            assigned_students,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning organization account.
    #[must_use]
    pub const fn org_id(&self) -> AccountId {
        self.org_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the assigned students in the order they were added.
    #[must_use]
    pub fn assigned_students(&self) -> &[AccountId] {
        &self.assigned_students
    }

    /// Returns `true` if `student_id` is on the roster.
    #[must_use]
    pub fn is_assigned(&self, student_id: AccountId) -> bool {
        self.assigned_students.contains(&student_id)
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds a student to the roster and marks the task active.
    ///
    /// Returns [`AssignmentOutcome::AlreadyAssigned`] without touching the
    /// task when the student is already a member.
    pub fn assign_student(
        &mut self,
        student_id: AccountId,
        at: DateTime<Utc>,
    ) -> AssignmentOutcome {
        if self.is_assigned(student_id) {
            return AssignmentOutcome::AlreadyAssigned;
        }
        self.assigned_students.push(student_id);
        self.status = TaskStatus::Active;
        self.updated_at = at;
        AssignmentOutcome::Added
    }
}
