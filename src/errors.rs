use crate::services::movie_service::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// A lightweight wrapper for handler errors that keeps the message local.
///
/// Serialized as `{"message": ...}` plus an `"error"` field carrying the raw
/// underlying error text when one exists.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            detail: None,
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Attach the raw underlying error text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Map a store error to its HTTP shape.
    ///
    /// A missing identifier is the fixed 404 body; everything else is a 500
    /// carrying the operation's message and the underlying error text.
    pub fn from_store(message: &str, err: StoreError) -> Self {
        match err {
            StoreError::MovieNotFound(_) => Self::not_found("Movie not found"),
            other => Self::internal(message).with_detail(other.to_string()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = json!({ "message": self.message });
        if let Some(detail) = self.detail {
            body["error"] = json!(detail);
        }

        (self.status, Json(body)).into_response()
    }
}
