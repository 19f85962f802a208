//! Roster assignment values exchanged between the offer and task contexts.

use super::TaskId;
use crate::account::AccountId;
use serde::{Deserialize, Serialize};

/// Request to place a student on a task's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskAssignment {
    task_id: TaskId,
    student_id: AccountId,
}

impl TaskAssignment {
    /// Creates an assignment of `student_id` to `task_id`.
    #[must_use]
    pub const fn new(task_id: TaskId, student_id: AccountId) -> Self {
        Self {
            task_id,
            student_id,
        }
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        self.task_id
    }

    /// Returns the student being assigned.
    #[must_use]
    pub const fn student_id(self) -> AccountId {
        self.student_id
    }
}

/// Result of applying a [`TaskAssignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentOutcome {
    /// The student was appended and the task marked active.
    Added,
    /// The student was already on the roster; nothing changed.
    AlreadyAssigned,
    /// No task row exists for the assignment; nothing changed.
    TaskMissing,
}
