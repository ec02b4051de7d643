/// Request extractors
///
/// [`JsonBody`] wraps `axum::Json` so malformed or mistyped request bodies
/// come back in the standard error format instead of axum's plain-text
/// rejection.

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON request body whose rejection is an [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
