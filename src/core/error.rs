//! Typed error handling for the HTTP surface
//!
//! Every request either fully succeeds or surfaces exactly one of these
//! errors; nothing is retried internally.
//!
//! # Error categories
//!
//! - `NotFound`: the record is absent, soft-deleted, or owned by someone else
//! - `Conflict`: a duplicate phone/ID-card among the owner's live records
//! - `Forbidden`: a disallowed status transition
//! - `Validation`: the request payload failed field validation
//! - `BadRequest`: the request body could not be parsed
//! - `Store`: the storage backend failed
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_tenant(id: Uuid, owner_id: Uuid) -> ApiResult<Tenant> {
//!     service.find_one(id, owner_id).await
//! }
//!
//! match result {
//!     Err(ApiError::NotFound { resource }) => println!("{} missing", resource),
//!     Err(e) => eprintln!("other error: {}", e),
//!     Ok(tenant) => println!("{}", tenant.code),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::store::StoreError;

/// Conflict identifiers surfaced to API clients on duplicate records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCode {
    PhoneExists,
    IdCardExists,
}

impl ConflictCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictCode::PhoneExists => "PHONE_EXISTS",
            ConflictCode::IdCardExists => "ID_CARD_EXISTS",
        }
    }
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// The main error type for request handling
#[derive(Debug)]
pub enum ApiError {
    /// Record absent, deleted, or not owned by the caller
    NotFound { resource: &'static str },

    /// Duplicate phone or ID card among the owner's live records
    Conflict { code: ConflictCode },

    /// Disallowed operation (e.g. manually setting a system-managed status)
    Forbidden { message: String },

    /// Request payload failed validation
    Validation { errors: Vec<FieldError> },

    /// Request body could not be parsed
    BadRequest { message: String },

    /// Storage backend failure
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { resource } => write!(f, "{} not found", resource),
            ApiError::Conflict { code } => write!(f, "{}", code.as_str()),
            ApiError::Forbidden { message } => write!(f, "{}", message),
            ApiError::Validation { errors } => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ApiError::BadRequest { message } => write!(f, "{}", message),
            ApiError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Shorthand for the forbidden status-transition error
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Conflict { code } => code.as_str(),
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Store(_) => "STORE_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::NotFound { resource } => Some(serde_json::json!({ "resource": resource })),
            ApiError::Validation { errors } => Some(serde_json::json!({ "fields": errors })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

/// A specialized Result type for request handling
pub type ApiResult<T> = Result<T, ApiError>;
