/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Bearer-token middleware and owner/tenant route guards
///
/// # Example
///
/// ```
/// use rentledger_shared::auth::password::{hash_password, verify_password};
/// use rentledger_shared::auth::jwt::{issue_token_pair, validate_access_token};
/// use rentledger_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("password")?;
/// assert!(verify_password("password", &hash)?);
///
/// let secret = "a-secret-of-at-least-32-characters!";
/// let tokens = issue_token_pair(Uuid::new_v4(), Role::Tenant, secret)?;
/// let claims = validate_access_token(&tokens.access_token, secret)?;
/// assert_eq!(claims.role, Role::Tenant);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
