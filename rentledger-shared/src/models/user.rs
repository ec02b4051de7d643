/// User accounts and signup payloads
///
/// Every account is either an owner (landlord) or a tenant. Tenants also get
/// a [`Tenant`](super::tenant::Tenant) document with the same ID.
///
/// Signup payloads are explicit per-role variants. They are validated at the
/// boundary, before any service sees them:
///
/// ```
/// use rentledger_shared::models::user::Signup;
///
/// let json = r#"{
///     "role": "owner",
///     "name": "John Doe",
///     "email": "owner@test.com",
///     "password": "password"
/// }"#;
/// let signup: Signup = serde_json::from_str(json).unwrap();
/// assert!(signup.validate().is_ok());
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Landlord managing tenants
    Owner,

    /// Renter managed by one owner
    Tenant,
}

impl Role {
    /// Gets role as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Tenant => "tenant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "tenant" => Ok(Role::Tenant),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, stored lower-cased; unique across all users
    pub email: String,

    /// Argon2id password hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Owner or tenant
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not yet stored, user
    pub fn new(
        name: impl Into<String>,
        email: impl AsRef<str>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            email: normalize_email(email.as_ref()),
            password_hash: password_hash.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Canonical form used for storing and looking up emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Owner registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSignup {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Tenant registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TenantSignup {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 64, message = "House number must be 1-64 characters"))]
    pub house_number: String,

    /// The owner this tenant rents from; must be an existing owner account
    pub owner_id: Uuid,
}

/// Registration payload, tagged by `role`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Signup {
    Owner(OwnerSignup),
    Tenant(TenantSignup),
}

impl Signup {
    /// Role being registered
    pub fn role(&self) -> Role {
        match self {
            Signup::Owner(_) => Role::Owner,
            Signup::Tenant(_) => Role::Tenant,
        }
    }

    /// Email being registered
    pub fn email(&self) -> &str {
        match self {
            Signup::Owner(s) => &s.email,
            Signup::Tenant(s) => &s.email,
        }
    }

    /// Field-level validation of the variant
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Signup::Owner(s) => s.validate(),
            Signup::Tenant(s) => s.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("tenant".parse::<Role>().unwrap(), Role::Tenant);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::Tenant.to_string(), "tenant");
    }

    #[test]
    fn test_new_user_normalizes_email() {
        let user = User::new(" John ", " Owner@Test.COM ", "hash", Role::Owner);
        assert_eq!(user.email, "owner@test.com");
        assert_eq!(user.name, "John");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("John", "owner@test.com", "secret-hash", Role::Owner);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("passwordHash"));
    }

    #[test]
    fn test_tenant_signup_requires_house_number() {
        let json = format!(
            r#"{{"role":"tenant","name":"Alice","email":"a@test.com","password":"password","houseNumber":"","ownerId":"{}"}}"#,
            Uuid::new_v4()
        );
        let signup: Signup = serde_json::from_str(&json).unwrap();
        assert_eq!(signup.role(), Role::Tenant);

        let errors = signup.validate().unwrap_err();
        assert!(errors.field_errors().keys().any(|k| k.to_string() == "house_number"));
    }

    #[test]
    fn test_tenant_signup_requires_owner_id() {
        let json = r#"{"role":"tenant","name":"Alice","email":"a@test.com","password":"password","houseNumber":"A-1"}"#;
        assert!(serde_json::from_str::<Signup>(json).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let json = r#"{"role":"admin","name":"X","email":"x@test.com","password":"password"}"#;
        assert!(serde_json::from_str::<Signup>(json).is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let json = r#"{"role":"owner","name":"John","email":"owner@test.com","password":"short"}"#;
        let signup: Signup = serde_json::from_str(json).unwrap();
        let errors = signup.validate().unwrap_err();
        assert!(errors.field_errors().keys().any(|k| k.to_string() == "password"));
    }
}
