/// Authentication middleware for Axum
///
/// Validates `Authorization: Bearer <token>` headers and adds an
/// [`AuthContext`] to the request extensions. Role guards run after it and
/// reject requests from the wrong kind of account.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use rentledger_shared::auth::middleware::{create_jwt_middleware, require_owner, AuthContext};
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, owner {}!", auth.user_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/owner-only", get(handler))
///     .layer(middleware::from_fn(require_owner))
///     .layer(middleware::from_fn(create_jwt_middleware("secret")));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::jwt::{validate_access_token, JwtError};
use crate::models::user::Role;

/// Authentication context added to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated account ID
    pub user_id: Uuid,

    /// Account role from the token
    pub role: Role,
}

impl AuthContext {
    /// Creates auth context from JWT claims
    pub fn from_jwt(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Fails with `AuthError::Forbidden` unless the account has `role`
    pub fn require(&self, role: Role) -> Result<(), AuthError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::Forbidden(format!("Requires {} account", role)))
        }
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),

    /// Authenticated, but the wrong role for this route
    Forbidden(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AuthError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Missing credentials".to_string(),
            ),
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            AuthError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
        };

        (status, Json(json!({ "error": error, "message": message }))).into_response()
    }
}

/// JWT authentication middleware
///
/// # Errors
///
/// - 401 if the header is missing, or the token is invalid or expired
/// - 400 if the header is not a Bearer token
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_access_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    req.extensions_mut()
        .insert(AuthContext::from_jwt(claims.sub, claims.role));

    Ok(next.run(req).await)
}

/// Creates a JWT authentication middleware closure capturing the secret
pub fn create_jwt_middleware(
    secret: impl Into<String>,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>> + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}

async fn require_role(role: Role, req: Request, next: Next) -> Result<Response, AuthError> {
    let auth = req
        .extensions()
        .get::<AuthContext>()
        .copied()
        .ok_or(AuthError::MissingCredentials)?;
    auth.require(role)?;
    Ok(next.run(req).await)
}

/// Rejects requests not made by an owner account
///
/// Must run after the JWT middleware.
pub async fn require_owner(req: Request, next: Next) -> Result<Response, AuthError> {
    require_role(Role::Owner, req, next).await
}

/// Rejects requests not made by a tenant account
///
/// Must run after the JWT middleware.
pub async fn require_tenant(req: Request, next: Next) -> Result<Response, AuthError> {
    require_role(Role::Tenant, req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_from_jwt() {
        let user_id = Uuid::new_v4();
        let context = AuthContext::from_jwt(user_id, Role::Owner);

        assert_eq!(context.user_id, user_id);
        assert_eq!(context.role, Role::Owner);
    }

    #[test]
    fn test_require_role() {
        let owner = AuthContext::from_jwt(Uuid::new_v4(), Role::Owner);
        assert!(owner.require(Role::Owner).is_ok());
        assert!(matches!(owner.require(Role::Tenant), Err(AuthError::Forbidden(_))));
    }

    #[test]
    fn test_auth_error_into_response() {
        assert_eq!(
            AuthError::MissingCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidFormat("test".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Forbidden("test".to_string()).into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
