//! Success envelope shared by every handler.
//!
//! Every response body has the shape
//! `{ "status": "success" | "fail", "message"?: string, "data"?: object }`.
//! Failures are produced by [`crate::error::AppError`]; this module covers the
//! success side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Status tag carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Wire form of the envelope.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A successful handler result: status code plus optional message and data.
#[derive(Debug)]
pub struct ApiResponse {
    pub status_code: StatusCode,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    /// 200 OK
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// 201 Created
    pub fn created() -> Self {
        Self::with_status(StatusCode::CREATED)
    }

    pub fn with_status(status_code: StatusCode) -> Self {
        Self {
            status_code,
            message: None,
            data: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a `data` object. Values that fail to serialize are dropped
    /// with an error log rather than failing the request.
    pub fn data(mut self, data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => self.data = Some(value),
            Err(err) => tracing::error!(error = %err, "failed to serialize response data"),
        }
        self
    }

    pub fn envelope(&self) -> Envelope {
        Envelope {
            status: Status::Success,
            message: self.message.clone(),
            data: self.data.clone(),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let body = Envelope {
            status: Status::Success,
            message: self.message,
            data: self.data,
        };
        (self.status_code, Json(body)).into_response()
    }
}
