//! # Error handling for the HR API
//!
//! Every handler returns [`ApiError`] on failure. Each variant maps to one
//! HTTP status and a sanitized JSON body:
//!
//! ```json
//! {"error": "Validation failed", "details": ["name is required"]}
//! ```
//!
//! Store and I/O failures are logged through `tracing` with their full
//! details; clients only ever see a generic message for those.

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// 404 - no row with the requested identity
    NotFound {
        resource: String,
        id: Option<String>,
    },

    /// 400 - malformed body or a value that cannot be parsed
    BadRequest { message: String },

    /// 422 - required fields missing
    ValidationFailed { errors: Vec<String> },

    /// 409 - unique constraint violation (e.g. employee email)
    DuplicateKey { message: String },

    /// 409 - status change not allowed by the record lifecycle
    InvalidTransition { message: String },

    /// 400 - rejected file upload
    Upload { message: String },

    /// 500 - store failure (details logged, not exposed)
    Database { message: String, internal: DbErr },

    /// 500 - any other internal failure (details logged, not exposed)
    Internal {
        message: String,
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// # Example
    /// ```rust,ignore
    /// return Err(ApiError::validation_failed(vec![
    ///     "name is required".to_string(),
    ///     "email is required".to_string(),
    /// ]));
    /// ```
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::DuplicateKey {
            message: message.into(),
        }
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition {
            message: message.into(),
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    /// The database error details are logged but NOT sent to the user.
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::Upload { .. } => StatusCode::BAD_REQUEST,
            Self::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DuplicateKey { .. } | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with ID '{id}' not found"),
                None => format!("{resource} not found"),
            },
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::BadRequest { message }
            | Self::DuplicateKey { message }
            | Self::InvalidTransition { message }
            | Self::Upload { message }
            | Self::Database { message, .. }
            | Self::Internal { message, .. } => message.clone(),
        }
    }

    /// Logs store and internal failures in full; everything else at debug.
    pub fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "Internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::ValidationFailed { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// - `DbErr::RecordNotFound` → 404
/// - unique constraint violation → 409 `DuplicateKey`
/// - everything else → 500, logged
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(msg) = &err {
            let resource = msg.split_whitespace().next().unwrap_or("Resource");
            return Self::not_found(resource, None);
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(detail = %detail, "Unique constraint rejected write");
                Self::duplicate_key("A record with the same unique value already exists")
            }
            _ => Self::database(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::upload(crate::upload::TOO_LARGE_MESSAGE)
        } else {
            Self::upload(format!("Invalid multipart request: {}", err.body_text()))
        }
    }
}
