//! Domain model for posted tasks and their assigned-student rosters.
//!
//! Tasks are owned by organizations. The offer workflow only ever touches a
//! task to add an accepted student to its roster.

mod assignment;
mod error;
mod ids;
mod task;

pub use assignment::{AssignmentOutcome, TaskAssignment};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use task::{PersistedTaskData, Task, TaskStatus};
