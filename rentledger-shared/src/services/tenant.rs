/// Tenant details, households and messaging

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::{check, own_tenant, owned_tenant};
use crate::error::{LedgerError, LedgerResult};
use crate::models::family_member::{FamilyMember, FamilyMemberUpdate, NewFamilyMember};
use crate::models::message::{Message, Recipient};
use crate::models::tenant::{Tenant, TenantUpdate};
use crate::store::RecordStore;

/// Tenant operations backed by the record store
#[derive(Clone)]
pub struct TenantService {
    store: Arc<dyn RecordStore>,
}

impl TenantService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The owner's tenants in signup order
    pub async fn list_tenants(&self, owner_id: Uuid) -> LedgerResult<Vec<Tenant>> {
        Ok(self.store.list_tenants_for_owner(owner_id).await?)
    }

    /// One of the owner's tenants
    pub async fn tenant(&self, owner_id: Uuid, tenant_id: Uuid) -> LedgerResult<Tenant> {
        owned_tenant(self.store.as_ref(), owner_id, tenant_id).await
    }

    /// The calling tenant's own document
    pub async fn tenant_self(&self, tenant_id: Uuid) -> LedgerResult<Tenant> {
        own_tenant(self.store.as_ref(), tenant_id).await
    }

    /// Edits name, email and house number; blank values are ignored
    ///
    /// # Errors
    ///
    /// `Conflict` if the new email belongs to another account
    #[instrument(skip(self, update))]
    pub async fn update_details(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        update: TenantUpdate,
    ) -> LedgerResult<Tenant> {
        check(&update)?;

        let mut tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        tenant.apply_update(&update);
        tenant.touch();
        self.store.save_tenant(&tenant).await?;

        info!("Tenant details updated");
        Ok(tenant)
    }

    #[instrument(skip(self, member))]
    pub async fn add_family_member(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        member: NewFamilyMember,
    ) -> LedgerResult<FamilyMember> {
        check(&member)?;

        let mut tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        let added = tenant.add_family_member(member);
        self.store.save_tenant(&tenant).await?;

        info!(member_id = %added.id, "Family member added");
        Ok(added)
    }

    #[instrument(skip(self, update))]
    pub async fn update_family_member(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        member_id: Uuid,
        update: FamilyMemberUpdate,
    ) -> LedgerResult<FamilyMember> {
        check(&update)?;

        let mut tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        let updated = tenant.update_family_member(member_id, update)?;
        self.store.save_tenant(&tenant).await?;

        info!("Family member updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn remove_family_member(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        member_id: Uuid,
    ) -> LedgerResult<FamilyMember> {
        let mut tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        let removed = tenant.remove_family_member(member_id)?;
        self.store.save_tenant(&tenant).await?;

        info!("Family member removed");
        Ok(removed)
    }

    /// Delivers an owner message and returns how many tenants received it
    ///
    /// Broadcasting to an owner without tenants reaches nobody and succeeds.
    ///
    /// Delivery is best effort: each recipient is saved in turn, so a store
    /// failure partway through a broadcast keeps the deliveries already made
    /// and skips the rest. The error is returned to the caller.
    ///
    /// # Errors
    ///
    /// - `Validation` if `content` is blank
    /// - `NotFound` if a single recipient is not one of the owner's tenants
    /// - `Store` if saving a recipient fails
    #[instrument(skip(self, content))]
    pub async fn send_message(
        &self,
        owner_id: Uuid,
        recipient: Recipient,
        content: &str,
    ) -> LedgerResult<usize> {
        let content = content.trim();
        if content.is_empty() {
            return Err(LedgerError::validation("message", "message is required"));
        }

        let targets = match recipient {
            Recipient::All => self.store.list_tenants_for_owner(owner_id).await?,
            Recipient::Tenant(id) => vec![owned_tenant(self.store.as_ref(), owner_id, id).await?],
        };

        let message = Message::from_owner(content);
        for mut tenant in targets.iter().cloned() {
            tenant.receive_message(message.clone());
            self.store.save_tenant(&tenant).await?;
        }

        info!(recipients = targets.len(), "Message sent");
        Ok(targets.len())
    }
}
