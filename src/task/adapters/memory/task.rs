//! In-memory repository for tasks, used by tests and database-less runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{AssignmentOutcome, Task, TaskAssignment, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Clones share the same underlying state, which lets the in-memory offer
/// repository apply roster changes under its own critical section.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an assignment synchronously under the write lock.
    ///
    /// The membership check and the append happen while the lock is held, so
    /// concurrent callers never lose each other's additions.
    pub(crate) fn apply_assignment(
        &self,
        assignment: TaskAssignment,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<AssignmentOutcome> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let Some(task) = state.get_mut(&assignment.task_id()) else {
            return Ok(AssignmentOutcome::TaskMissing);
        };
        Ok(task.assign_student(assignment.student_id(), at))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn assign_student(
        &self,
        assignment: TaskAssignment,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<AssignmentOutcome> {
        self.apply_assignment(assignment, at)
    }
}
