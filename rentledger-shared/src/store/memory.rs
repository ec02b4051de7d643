/// In-memory record store
///
/// All state sits behind one `tokio::sync::RwLock`, so each store call is
/// atomic with respect to the others. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::models::tenant::Tenant;
use crate::models::user::{normalize_email, User};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    tenants: HashMap<Uuid, Tenant>,
    /// Tenant IDs in signup order
    tenant_order: Vec<Uuid>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Process-local [`RecordStore`]
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, mut user: User, tenant: Option<Tenant>) -> StoreResult<User> {
        user.email = normalize_email(&user.email);

        let mut inner = self.inner.write().await;
        if inner.email_taken(&user.email, None) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        if let Some(mut tenant) = tenant {
            tenant.id = user.id;
            tenant.email = user.email.clone();
            inner.tenant_order.push(tenant.id);
            inner.tenants.insert(tenant.id, tenant);
        }
        inner.users.insert(user.id, user.clone());

        debug!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = normalize_email(email);
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_tenant(&self, id: Uuid) -> StoreResult<Option<Tenant>> {
        Ok(self.inner.read().await.tenants.get(&id).cloned())
    }

    async fn list_tenants_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Tenant>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tenant_order
            .iter()
            .filter_map(|id| inner.tenants.get(id))
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn save_tenant(&self, tenant: &Tenant) -> StoreResult<()> {
        let email = normalize_email(&tenant.email);

        let mut inner = self.inner.write().await;
        if !inner.tenants.contains_key(&tenant.id) {
            return Err(StoreError::NotFound {
                entity: "Tenant",
                id: tenant.id,
            });
        }
        if inner.email_taken(&email, Some(tenant.id)) {
            return Err(StoreError::DuplicateEmail(email));
        }

        if let Some(user) = inner.users.get_mut(&tenant.id) {
            user.name = tenant.name.clone();
            user.email = email.clone();
            user.updated_at = Utc::now();
        }

        let mut stored = tenant.clone();
        stored.email = email;
        inner.tenants.insert(stored.id, stored);

        debug!(tenant_id = %tenant.id, "Tenant saved");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
