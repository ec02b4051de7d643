/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`, so service failures convert
/// to status codes with `?`.
///
/// # Example
///
/// ```
/// use rentledger_api::error::{ApiError, ApiResult};
/// use rentledger_shared::error::LedgerError;
///
/// fn record() -> Result<(), LedgerError> {
///     Err(LedgerError::validation("rent", "rent is required"))
/// }
///
/// fn handler() -> ApiResult<()> {
///     record()?;
///     Ok(())
/// }
///
/// assert!(matches!(handler(), Err(ApiError::ValidationError(_))));
/// ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rentledger_shared::{auth::jwt::JwtError, error::LedgerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidationErrors;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => {
                let message = errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "Request validation failed".to_string());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation_error",
                    message,
                    Some(errors),
                )
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert ledger and service errors to API errors
impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation { field, message } => {
                ApiError::ValidationError(vec![ValidationErrorDetail { field, message }])
            }
            err @ LedgerError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            LedgerError::Conflict(msg) => ApiError::Conflict(msg),
            err @ LedgerError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            err @ (LedgerError::Password(_) | LedgerError::Store(_)) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

/// Convert request payload validation errors to API errors
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::ValidationError(details)
    }
}

/// Convert request body rejections to API errors
///
/// Bodies that parse as JSON but don't fit the target type become
/// validation errors naming the offending field; everything else is a
/// bad request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                ApiError::ValidationError(vec![body_error_detail(&err.body_text())])
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// Splits a deserialization message like `rent: invalid type: ...` into
/// the field path and the message.
fn body_error_detail(text: &str) -> ValidationErrorDetail {
    let reason = text
        .split_once("target type: ")
        .map(|(_, reason)| reason)
        .unwrap_or(text);

    let field = match reason.split_once(": ") {
        Some((path, _)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            path.to_string()
        }
        _ => reason
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
            .unwrap_or("body")
            .to_string(),
    };

    ValidationErrorDetail {
        field,
        message: reason.to_string(),
    }
}

/// Convert JWT errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => {
                ApiError::Unauthorized("Invalid token issuer".to_string())
            }
            JwtError::CreateError(msg) => {
                ApiError::InternalError(format!("Token creation failed: {}", msg))
            }
            _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentledger_shared::error::StoreError;
    use uuid::Uuid;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Tenant not found".to_string());
        assert_eq!(err.to_string(), "Not found: Tenant not found");
    }

    #[test]
    fn test_ledger_error_status_codes() {
        let cases = vec![
            (LedgerError::validation("rent", "rent is required"), StatusCode::UNPROCESSABLE_ENTITY),
            (LedgerError::not_found("Tenant", Uuid::nil()), StatusCode::NOT_FOUND),
            (LedgerError::Conflict("taken".to_string()), StatusCode::CONFLICT),
            (LedgerError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                LedgerError::Store(StoreError::Corrupt("bad row".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_validation_keeps_field() {
        match ApiError::from(LedgerError::validation("amountPaid", "amountPaid must be finite")) {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "amountPaid");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_body_error_detail_names_field() {
        let detail = body_error_detail(
            "Failed to deserialize the JSON body into the target type: rent: invalid type: string \"abc\", expected f64 at line 1 column 14",
        );
        assert_eq!(detail.field, "rent");
        assert!(detail.message.starts_with("rent: invalid type"));

        let detail = body_error_detail(
            "Failed to deserialize the JSON body into the target type: missing field `month` at line 1 column 2",
        );
        assert_eq!(detail.field, "month");

        let detail = body_error_detail("trailing characters at line 1 column 5");
        assert_eq!(detail.field, "body");
    }

    #[test]
    fn test_jwt_errors_are_unauthorized() {
        let err = ApiError::from(JwtError::Expired);
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
