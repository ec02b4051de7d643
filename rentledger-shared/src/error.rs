/// Error types shared by the ledger engine, record store and services
///
/// Every failure is local to the single operation that produced it. A
/// failed call never leaves a tenant record partially mutated.
///
/// # Example
///
/// ```
/// use rentledger_shared::error::LedgerError;
///
/// let err = LedgerError::validation("rent", "rent is required");
/// assert_eq!(err.to_string(), "Invalid rent: rent is required");
/// ```

use uuid::Uuid;

/// Result alias for ledger and service operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Result alias for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the ledger engine and the services built on it
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A required field is missing, non-numeric or out of range
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A referenced tenant, payment, family member or user does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request collides with existing data (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Email/password/role combination did not match an account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password hashing failed
    #[error("Password operation failed: {0}")]
    Password(#[from] crate::auth::password::PasswordError),

    /// The record store failed
    #[error("Record store error: {0}")]
    Store(StoreError),
}

impl LedgerError {
    /// Builds a validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a not-found error for an entity keyed by UUID
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => {
                LedgerError::Conflict(format!("Email already registered: {}", email))
            }
            StoreError::NotFound { entity, id } => LedgerError::NotFound {
                entity,
                id: id.to_string(),
            },
            other => LedgerError::Store(other),
        }
    }
}

/// Errors surfaced by [`RecordStore`](crate::store::RecordStore) implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another user already owns this email
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// The record to update does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// A stored row could not be mapped back to a domain value
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
