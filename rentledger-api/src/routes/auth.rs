/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register an owner or tenant account
/// - `POST /v1/auth/login` - Login with email, password and role
/// - `POST /v1/auth/refresh` - Exchange a refresh token for an access token
/// - `GET /v1/auth/profile` - The authenticated account's profile

use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, http::StatusCode, Extension, Json};
use rentledger_shared::{
    auth::{
        jwt::{self, TokenPair, TokenType},
        middleware::AuthContext,
    },
    models::user::{Role, Signup, User},
    services::Profile,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Which kind of account to log into
    pub role: Role,
}

/// Register and login response: the account plus a fresh token pair
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,

    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Register a new account
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "role": "tenant",
///   "name": "Alice Smith",
///   "email": "alice@example.com",
///   "password": "correct-horse",
///   "houseNumber": "A-101",
///   "ownerId": "uuid"
/// }
/// ```
///
/// Owners omit `houseNumber` and `ownerId`.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `404 Not Found`: `ownerId` is not an owner account
/// - `409 Conflict`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<Signup>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    req.validate()?;

    let user = state.accounts.register(req).await?;
    let tokens = jwt::issue_token_pair(user.id, user.role, state.jwt_secret())?;

    Ok((StatusCode::CREATED, Json(SessionResponse { user, tokens })))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "owner@test.com",
///   "password": "password",
///   "role": "owner"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "user": { "id": "uuid", "name": "John Doe", "role": "owner", ... },
///   "accessToken": "eyJ...",
///   "refreshToken": "eyJ...",
///   "tokenType": "Bearer",
///   "expiresIn": 86400
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email, wrong password or wrong role
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    req.validate()?;

    let user = state
        .accounts
        .authenticate(&req.email, &req.password, req.role)
        .await?;
    let tokens = jwt::issue_token_pair(user.id, user.role, state.jwt_secret())?;

    Ok(Json(SessionResponse { user, tokens }))
}

/// Refresh token endpoint
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid, expired or non-refresh token
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: TokenType::Access.default_expiration().num_seconds(),
    }))
}

/// Profile of the authenticated account
///
/// Owners get their account; tenants get their full tenant record.
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.accounts.profile(auth.user_id).await?))
}
