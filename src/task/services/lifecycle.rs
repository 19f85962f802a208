//! Service layer for posting tasks and updating their rosters.

use crate::account::AccountId;
use crate::task::{
    domain::{AssignmentOutcome, Task, TaskAssignment, TaskDomainError, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for posting a task on behalf of an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTaskRequest {
    org_id: String,
    title: String,
}

impl PostTaskRequest {
    /// Creates a request from raw caller input.
    #[must_use]
    pub fn new(org_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            title: title.into(),
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task posting and assignment service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Posts a new open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a malformed organization
    /// identifier or a blank title, and [`TaskLifecycleError::Repository`]
    /// when persistence fails.
    pub async fn post_task(&self, request: PostTaskRequest) -> TaskLifecycleResult<Task> {
        let org_id =
            AccountId::parse(&request.org_id).map_err(|_| TaskDomainError::InvalidIdentifier {
                field: "orgId",
                value: request.org_id.clone(),
            })?;
        let title = TaskTitle::new(request.title)?;
        let task = Task::post(org_id, title, &*self.clock);
        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), org_id = %org_id, "task posted");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Adds a student to a task roster.
    ///
    /// Idempotent on membership: a student already on the roster yields
    /// [`AssignmentOutcome::AlreadyAssigned`], and a missing task yields
    /// [`AssignmentOutcome::TaskMissing`]. Neither is an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the update fails.
    pub async fn assign_student(
        &self,
        assignment: TaskAssignment,
    ) -> TaskLifecycleResult<AssignmentOutcome> {
        let outcome = self
            .repository
            .assign_student(assignment, self.clock.utc())
            .await?;
        match outcome {
            AssignmentOutcome::TaskMissing => tracing::warn!(
                task_id = %assignment.task_id(),
                student_id = %assignment.student_id(),
                "assignment skipped: task not found"
            ),
            AssignmentOutcome::Added | AssignmentOutcome::AlreadyAssigned => tracing::info!(
                task_id = %assignment.task_id(),
                student_id = %assignment.student_id(),
                ?outcome,
                "task assignment applied"
            ),
        }
        Ok(outcome)
    }
}
