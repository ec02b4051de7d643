/// Registration, login and profile lookup

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{LedgerError, LedgerResult};
use crate::models::tenant::Tenant;
use crate::models::user::{Role, Signup, User};
use crate::store::RecordStore;

/// The authenticated account's view of itself
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", content = "profile", rename_all = "lowercase")]
pub enum Profile {
    Owner(User),
    Tenant(Tenant),
}

/// Account operations
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn RecordStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Creates an owner or tenant account
    ///
    /// Tenants get an empty tenant document tied to `ownerId`.
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed fields
    /// - `NotFound` if a tenant's `ownerId` is not an owner account
    /// - `Conflict` if the email is already registered
    #[instrument(skip(self, signup), fields(role = %signup.role()))]
    pub async fn register(&self, signup: Signup) -> LedgerResult<User> {
        signup.validate().map_err(super::first_validation_error)?;

        if self.store.find_user_by_email(signup.email()).await?.is_some() {
            return Err(LedgerError::Conflict(format!(
                "Email already registered: {}",
                signup.email().trim().to_lowercase()
            )));
        }

        let user = match signup {
            Signup::Owner(s) => {
                let user = User::new(s.name, &s.email, hash_password(&s.password)?, Role::Owner);
                self.store.create_user(user, None).await?
            }
            Signup::Tenant(s) => {
                match self.store.find_user(s.owner_id).await? {
                    Some(owner) if owner.role == Role::Owner => {}
                    _ => return Err(LedgerError::not_found("Owner", s.owner_id)),
                }

                let user = User::new(s.name, &s.email, hash_password(&s.password)?, Role::Tenant);
                let profile = Tenant::for_user(&user, s.house_number.trim().to_string(), s.owner_id);
                self.store.create_user(user, Some(profile)).await?
            }
        };

        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    /// Checks an email/password/role combination
    ///
    /// Every mismatch, including a wrong role, is `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str, role: Role) -> LedgerResult<User> {
        let user = match self.store.find_user_by_email(email).await? {
            Some(user) if user.role == role => user,
            _ => {
                warn!(%role, "Login failed: unknown account");
                return Err(LedgerError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(LedgerError::InvalidCredentials);
        }

        info!(user_id = %user.id, %role, "User logged in");
        Ok(user)
    }

    /// Loads the account behind a token subject
    pub async fn user(&self, user_id: Uuid) -> LedgerResult<User> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("User", user_id))
    }

    /// The owner account, or the full tenant document for tenants
    pub async fn profile(&self, user_id: Uuid) -> LedgerResult<Profile> {
        let user = self.user(user_id).await?;
        match user.role {
            Role::Owner => Ok(Profile::Owner(user)),
            Role::Tenant => self
                .store
                .find_tenant(user_id)
                .await?
                .map(Profile::Tenant)
                .ok_or_else(|| LedgerError::not_found("Tenant", user_id)),
        }
    }
}
