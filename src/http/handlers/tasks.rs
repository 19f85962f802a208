//! Task posting and lookup.

use crate::account::AccountId;
use crate::http::{ApiError, AppState};
use crate::task::{
    domain::{Task, TaskId},
    services::PostTaskRequest,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/tasks`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    #[serde(default)]
    org_id: String,
    #[serde(default)]
    title: String,
}

/// Response of `POST /api/tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskResponse {
    success: bool,
    task_id: TaskId,
}

/// Task as returned by read endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    id: TaskId,
    org_id: AccountId,
    title: String,
    assigned_students: Vec<AccountId>,
    status: &'static str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            org_id: task.org_id(),
            title: task.title().as_str().to_owned(),
            assigned_students: task.assigned_students().to_vec(),
            status: task.status().as_str(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Posts a task for an organization.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<Json<CreateTaskResponse>, ApiError> {
    let Json(body) = payload?;
    let task = state
        .tasks
        .post_task(PostTaskRequest::new(body.org_id, body.title))
        .await?;

    Ok(Json(CreateTaskResponse {
        success: true,
        task_id: task.id(),
    }))
}

/// Returns one task with its roster.
pub async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let task_id = TaskId::parse(&raw_id)
        .map_err(|_| ApiError::bad_request(format!("invalid task id '{raw_id}'")))?;
    let task = state
        .tasks
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("task not found: {task_id}")))?;
    Ok(Json(TaskView::from(&task)))
}
