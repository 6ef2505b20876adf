//! Axum extractors for request scoping and validated payloads
//!
//! Scoping ids arrive as headers (`x-owner-id`, `x-user-id`) and are passed
//! to the services as explicit parameters; nothing reads them from ambient
//! state. Payloads are deserialized and validated before a handler runs.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{ApiError, FieldError};

/// Header carrying the landlord/owner account id
pub const OWNER_ID_HEADER: &str = "x-owner-id";

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Errors that can occur while extracting scoping headers
#[derive(Debug, Clone)]
pub enum ExtractError {
    MissingHeader(&'static str),
    InvalidId(&'static str),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::MissingHeader(header) => write!(f, "Missing required header: {}", header),
            ExtractError::InvalidId(header) => write!(f, "Invalid id in header: {}", header),
        }
    }
}

impl std::error::Error for ExtractError {}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let code = match self {
            ExtractError::MissingHeader(_) => "MISSING_HEADER",
            ExtractError::InvalidId(_) => "INVALID_ID",
        };
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "code": code, "message": self.to_string() })),
        )
            .into_response()
    }
}

fn header_id(parts: &Parts, header: &'static str) -> Result<Uuid, ExtractError> {
    let value = parts
        .headers
        .get(header)
        .ok_or(ExtractError::MissingHeader(header))?;
    value
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or(ExtractError::InvalidId(header))
}

/// Owner scoping id extracted from `x-owner-id`
#[derive(Debug, Clone, Copy)]
pub struct OwnerId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for OwnerId {
    type Rejection = ExtractError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_id(parts, OWNER_ID_HEADER).map(OwnerId)
    }
}

/// User scoping id extracted from `x-user-id`
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = ExtractError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_id(parts, USER_ID_HEADER).map(UserId)
    }
}

/// JSON payload extractor that validates before the handler runs
///
/// # Usage
///
/// ```rust,ignore
/// async fn create_tenant(
///     ValidatedJson(body): ValidatedJson<CreateTenant>,
/// ) -> ApiResult<Json<Tenant>> {
///     // body passed validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        value.validate().map_err(|errors| {
            let errors = errors
                .field_errors()
                .into_iter()
                .map(|(field, field_errors)| {
                    let message = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    FieldError {
                        field: field.to_string(),
                        message,
                    }
                })
                .collect();
            ApiError::Validation { errors }
        })?;

        Ok(ValidatedJson(value))
    }
}
