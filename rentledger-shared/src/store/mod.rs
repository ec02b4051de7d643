/// Record store abstraction
///
/// Services never talk to a database directly. They hold an
/// `Arc<dyn RecordStore>` chosen at startup:
///
/// - [`memory::MemoryStore`]: process-local maps, the default backend and the
///   one tests use
/// - [`postgres::PgStore`]: PostgreSQL, one row per account with JSONB
///   arrays for the tenant document
///
/// The store persists whole tenant documents (read-modify-write). It does
/// not compute or validate ledger values.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::tenant::Tenant;
use crate::models::user::User;

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence operations used by the services
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name reported by health checks
    fn backend(&self) -> &'static str;

    /// Inserts a user, plus its tenant document for tenant accounts
    ///
    /// Both are written together or not at all.
    ///
    /// # Errors
    ///
    /// `StoreError::DuplicateEmail` if another account uses the email
    async fn create_user(&self, user: User, tenant: Option<Tenant>) -> StoreResult<User>;

    /// Looks up an account by ID
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Looks up an account by (case-insensitive) email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Loads a tenant document
    async fn find_tenant(&self, id: Uuid) -> StoreResult<Option<Tenant>>;

    /// All tenants of an owner, in signup order
    async fn list_tenants_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Tenant>>;

    /// Replaces a tenant document and syncs the account's name and email
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the tenant does not exist
    /// - `StoreError::DuplicateEmail` if the new email belongs to another account
    async fn save_tenant(&self, tenant: &Tenant) -> StoreResult<()>;

    /// Cheap liveness probe
    async fn ping(&self) -> StoreResult<()>;
}
