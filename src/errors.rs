use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Field-level outcome of validating a submitted form or payload.
///
/// `message` is the single user-facing line; the field lists let a client
/// highlight what needs fixing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub message: String,
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
}

impl ValidationErrors {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            missing: Vec::new(),
            invalid: Vec::new(),
        }
    }

    pub fn missing(&mut self, field: &str) {
        self.missing.push(field.to_string());
    }

    pub fn invalid(&mut self, field: &str) {
        self.invalid.push(field.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// `Ok(())` when nothing was flagged, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.missing.is_empty() {
            write!(f, " (missing: {})", self.missing.join(", "))?;
        }
        if !self.invalid.is_empty() {
            write!(f, " (invalid: {})", self.invalid.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown supplier: {0}")]
    UnknownSupplier(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("External error: {0}")]
    External(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid: Option<&'a [String]>,
}

impl ErrorBody<'_> {
    fn plain(error: &str) -> ErrorBody<'_> {
        ErrorBody { error, missing: None, invalid: None }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: &errors.message,
                    missing: Some(&errors.missing),
                    invalid: Some(&errors.invalid),
                }),
            )
                .into_response(),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::plain(msg))).into_response()
            }
            AppError::UnknownSupplier(id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::plain(&format!("Unknown supplier: {}", id))),
            )
                .into_response(),
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(ErrorBody::plain(msg))).into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::plain(msg))).into_response()
            }
            AppError::External(msg) => {
                (StatusCode::BAD_GATEWAY, Json(ErrorBody::plain(msg))).into_response()
            }
        }
    }
}
