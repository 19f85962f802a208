//! Mapping from service errors to HTTP responses.

use crate::admin::AdminAuthError;
use crate::offer::services::OfferLifecycleError;
use crate::profile::services::ProfileBootstrapError;
use crate::task::services::TaskLifecycleError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error response rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a `400 Bad Request` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a `404 Not Found` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a `401 Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a `500 Internal Server Error`, logging the cause.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        let error = Self::new(StatusCode::INTERNAL_SERVER_ERROR, message);
        tracing::error!(error = %error.message, "request failed in storage");
        error
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<OfferLifecycleError> for ApiError {
    fn from(err: OfferLifecycleError) -> Self {
        match err {
            OfferLifecycleError::Validation(_) | OfferLifecycleError::InvalidAction(_) => {
                Self::bad_request(err.to_string())
            }
            OfferLifecycleError::NotFound(_) => Self::not_found(err.to_string()),
            OfferLifecycleError::Conflict(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
            OfferLifecycleError::Storage(_) => Self::storage(err.to_string()),
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(_) => Self::bad_request(err.to_string()),
            TaskLifecycleError::Repository(_) => Self::storage(err.to_string()),
        }
    }
}

impl From<ProfileBootstrapError> for ApiError {
    fn from(err: ProfileBootstrapError) -> Self {
        match err {
            ProfileBootstrapError::Validation(_) | ProfileBootstrapError::InvalidRole(_) => {
                Self::bad_request(err.to_string())
            }
            ProfileBootstrapError::Repository(_) => Self::storage(err.to_string()),
        }
    }
}

impl From<AdminAuthError> for ApiError {
    fn from(err: AdminAuthError) -> Self {
        match err {
            AdminAuthError::Misconfigured(_) => Self::storage(err.to_string()),
            AdminAuthError::InvalidCredentials
            | AdminAuthError::InvalidToken
            | AdminAuthError::Expired => Self::unauthorized(err.to_string()),
        }
    }
}
