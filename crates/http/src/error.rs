//! Error handling for the bookshelf HTTP layer

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::response::{Envelope, Status};

/// Application error types that map to HTTP responses.
///
/// The display string of each variant is the client-facing message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String, code: String },

    #[error("{message}")]
    NotFound { message: String, code: String },

    #[error("{message}")]
    Internal { message: String, code: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: code.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create an internal error with a client-facing message
    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } | AppError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &str {
        match self {
            AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Internal { code, .. } => code,
            AppError::Unexpected(_) => "internal_error",
        }
    }

    /// Message shown to clients. Unexpected errors hide their details in
    /// release builds.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Unexpected(_) if cfg!(not(debug_assertions)) => {
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("malformed_payload", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request("malformed_query", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = %self.code(),
                status_code = %status.as_u16(),
                error = %self,
                "request error"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                error_code = %self.code(),
                status_code = %status.as_u16(),
                "request rejected"
            );
        }

        let body = Envelope {
            status: Status::Fail,
            message: Some(self.client_message()),
            data: None,
        };

        (status, Json(body)).into_response()
    }
}
