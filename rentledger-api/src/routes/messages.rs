/// Owner-to-tenant messaging
///
/// `POST /v1/messages` with `{"recipient": "all" | "<tenant id>", "message": "..."}`

use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, Extension, Json};
use rentledger_shared::{auth::middleware::AuthContext, models::message::Recipient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub recipient: Recipient,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// Number of tenants the message was delivered to
    pub delivered: usize,
}

/// Sends a message to one tenant or broadcasts to all of the owner's tenants
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Blank message
/// - `404 Not Found`: The recipient is not one of the owner's tenants
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    JsonBody(req): JsonBody<SendMessageRequest>,
) -> ApiResult<Json<SendMessageResponse>> {
    let delivered = state
        .tenants
        .send_message(auth.user_id, req.recipient, &req.message)
        .await?;
    Ok(Json(SendMessageResponse { delivered }))
}
