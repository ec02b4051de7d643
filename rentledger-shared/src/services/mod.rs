/// Application services
///
/// Each service owns an `Arc<dyn RecordStore>` handed in at construction
/// and is cheap to clone. Owner-scoped operations treat a tenant that
/// belongs to another owner exactly like a missing tenant.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rentledger_shared::services::{AccountService, LedgerService, TenantService};
/// use rentledger_shared::store::{MemoryStore, RecordStore};
///
/// let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
/// let accounts = AccountService::new(store.clone());
/// let ledger = LedgerService::new(store.clone());
/// let tenants = TenantService::new(store);
/// ```

use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::error::{LedgerError, LedgerResult};
use crate::models::tenant::Tenant;
use crate::store::RecordStore;

pub mod account;
pub mod ledger;
pub mod tenant;

pub use account::{AccountService, Profile};
pub use ledger::{LedgerService, PeriodReport};
pub use tenant::TenantService;

/// Runs `validator` checks and reports the first failing field
pub(crate) fn check<T: Validate>(payload: &T) -> LedgerResult<()> {
    payload.validate().map_err(first_validation_error)
}

/// Collapses `validator` errors into a single `LedgerError::Validation`
///
/// Fields are reported in name order so the result is stable.
pub fn first_validation_error(errors: ValidationErrors) -> LedgerError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    fields.sort();

    match fields.into_iter().next() {
        Some((field, message)) => LedgerError::Validation { field, message },
        None => LedgerError::validation("request", "Validation failed"),
    }
}

/// Loads a tenant that `owner_id` owns
pub(crate) async fn owned_tenant(
    store: &dyn RecordStore,
    owner_id: Uuid,
    tenant_id: Uuid,
) -> LedgerResult<Tenant> {
    match store.find_tenant(tenant_id).await? {
        Some(tenant) if tenant.is_owned_by(owner_id) => Ok(tenant),
        _ => Err(LedgerError::not_found("Tenant", tenant_id)),
    }
}

/// Loads a tenant by its own account ID
pub(crate) async fn own_tenant(store: &dyn RecordStore, tenant_id: Uuid) -> LedgerResult<Tenant> {
    store
        .find_tenant(tenant_id)
        .await?
        .ok_or_else(|| LedgerError::not_found("Tenant", tenant_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::family_member::NewFamilyMember;

    #[test]
    fn test_first_validation_error_is_stable() {
        let member = NewFamilyMember {
            name: String::new(),
            age: 200,
            relation: String::new(),
        };

        let err = check(&member).unwrap_err();
        match err {
            LedgerError::Validation { field, .. } => assert_eq!(field, "age"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
