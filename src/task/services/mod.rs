//! Application services for task posting and roster assignment.

mod lifecycle;

pub use lifecycle::{
    PostTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
