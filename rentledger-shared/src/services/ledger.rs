/// Payment ledger operations over stored tenants
///
/// Owner-facing methods take the acting owner's ID and only touch that
/// owner's tenants. The `own_*` methods serve a tenant reading their own
/// ledger.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{own_tenant, owned_tenant};
use crate::error::LedgerResult;
use crate::ledger::engine;
use crate::ledger::payment::{Payment, PaymentInput, PaymentUpdate};
use crate::ledger::period::Period;
use crate::ledger::summary::{
    self, HistoryFilter, OwnerSummary, PeriodStatus, TenantStatusRow,
};
use crate::models::tenant::Tenant;
use crate::store::RecordStore;

/// A tenant's standing for one period, with the record it was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub tenant_id: Uuid,
    pub period: Period,
    pub status: PeriodStatus,
    pub payment: Option<Payment>,
}

impl PeriodReport {
    fn for_tenant(tenant: &Tenant, period: Period) -> Self {
        Self {
            tenant_id: tenant.id,
            period,
            status: summary::current_period_status(tenant, period),
            payment: summary::payment_for_period(tenant, period).cloned(),
        }
    }
}

/// Ledger operations backed by the record store
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn RecordStore>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Records a payment for one of the owner's tenants
    #[instrument(skip(self, input))]
    pub async fn add_payment(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        input: PaymentInput,
    ) -> LedgerResult<Payment> {
        let mut tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        let payment = engine::add_payment(&mut tenant, input, Utc::now())?;
        self.store.save_tenant(&tenant).await?;

        info!(
            payment_id = %payment.id,
            period = %payment.period(),
            total_due = payment.total_due,
            amount_paid = payment.amount_paid,
            "Payment recorded"
        );
        Ok(payment)
    }

    /// Edits a payment record and recomputes its derived fields
    #[instrument(skip(self, update))]
    pub async fn update_payment(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        payment_id: Uuid,
        update: PaymentUpdate,
    ) -> LedgerResult<Payment> {
        let mut tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        let payment = engine::update_payment(&mut tenant, payment_id, update)?;
        self.store.save_tenant(&tenant).await?;

        info!(balance = payment.balance, "Payment updated");
        Ok(payment)
    }

    /// Deletes a payment record
    #[instrument(skip(self))]
    pub async fn remove_payment(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        payment_id: Uuid,
    ) -> LedgerResult<Payment> {
        let mut tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        let removed = engine::remove_payment(&mut tenant, payment_id)?;
        self.store.save_tenant(&tenant).await?;

        info!("Payment removed");
        Ok(removed)
    }

    /// Fetches one payment record
    pub async fn payment(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        payment_id: Uuid,
    ) -> LedgerResult<Payment> {
        let tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        engine::find_payment(&tenant, payment_id).cloned()
    }

    /// A tenant's standing for `period`
    pub async fn period_status(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        period: Period,
    ) -> LedgerResult<PeriodReport> {
        let tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        Ok(PeriodReport::for_tenant(&tenant, period))
    }

    /// Dashboard totals across the owner's tenants
    pub async fn owner_summary(&self, owner_id: Uuid, period: Period) -> LedgerResult<OwnerSummary> {
        let tenants = self.store.list_tenants_for_owner(owner_id).await?;
        Ok(summary::aggregate_for_owner(&tenants, period))
    }

    /// One status row per tenant of the owner
    pub async fn tenant_overview(
        &self,
        owner_id: Uuid,
        period: Period,
    ) -> LedgerResult<Vec<TenantStatusRow>> {
        let tenants = self.store.list_tenants_for_owner(owner_id).await?;
        Ok(summary::tenant_overview(&tenants, period))
    }

    /// Filtered payment history of one of the owner's tenants
    pub async fn payment_history(
        &self,
        owner_id: Uuid,
        tenant_id: Uuid,
        filter: HistoryFilter,
    ) -> LedgerResult<Vec<Payment>> {
        let tenant = owned_tenant(self.store.as_ref(), owner_id, tenant_id).await?;
        Ok(summary::payment_history(&tenant, filter))
    }

    /// The calling tenant's standing for `period`
    pub async fn own_status(&self, tenant_id: Uuid, period: Period) -> LedgerResult<PeriodReport> {
        let tenant = own_tenant(self.store.as_ref(), tenant_id).await?;
        Ok(PeriodReport::for_tenant(&tenant, period))
    }

    /// The calling tenant's filtered payment history
    pub async fn own_history(
        &self,
        tenant_id: Uuid,
        filter: HistoryFilter,
    ) -> LedgerResult<Vec<Payment>> {
        let tenant = own_tenant(self.store.as_ref(), tenant_id).await?;
        Ok(summary::payment_history(&tenant, filter))
    }
}
