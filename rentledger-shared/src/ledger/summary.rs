/// Read-side ledger queries: status classification, owner aggregates and
/// payment history
///
/// When a tenant has more than one record for a period (nothing forbids
/// it) the first record in insertion order is the one that counts.
///
/// Overpayment is not carried forward: a negative balance stays on its own
/// record and never reduces another period's, or another tenant's, dues.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment::Payment;
use super::period::Period;
use crate::models::tenant::Tenant;

/// Payment status of a tenant for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodStatus {
    /// No payment record exists for the period
    NoRecord,

    /// `amountPaid >= totalDue`
    Paid,

    /// `0 < amountPaid < totalDue`
    Partial,

    /// `amountPaid <= 0`
    Due,
}

impl PeriodStatus {
    /// Gets status as a display label
    pub fn label(&self) -> &'static str {
        match self {
            PeriodStatus::NoRecord => "No Record",
            PeriodStatus::Paid => "Paid",
            PeriodStatus::Partial => "Partial",
            PeriodStatus::Due => "Due",
        }
    }
}

/// Dashboard totals for one owner and period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    /// Period the totals cover
    pub period: Period,

    /// Number of tenants considered
    pub total_tenants: usize,

    /// Sum of `amountPaid` for the period
    pub collected: f64,

    /// Sum of per-record outstanding amounts, each clamped at zero
    pub pending_dues: f64,
}

/// One row of an owner's tenant list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantStatusRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub house_number: String,
    pub status: PeriodStatus,

    /// Display form of `status`, e.g. "No Record"
    pub status_label: String,
}

/// Optional year/month filter for payment history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl HistoryFilter {
    fn matches(&self, payment: &Payment) -> bool {
        self.year.map_or(true, |y| payment.year == y)
            && self.month.map_or(true, |m| payment.month == m)
    }
}

/// The tenant's record for `period`, if any
pub fn payment_for_period(tenant: &Tenant, period: Period) -> Option<&Payment> {
    tenant.payments.iter().find(|p| p.is_for(period))
}

/// Classifies the tenant's standing for `period`
pub fn current_period_status(tenant: &Tenant, period: Period) -> PeriodStatus {
    payment_for_period(tenant, period).map_or(PeriodStatus::NoRecord, Payment::status)
}

/// Totals collected and pending amounts across `tenants` for `period`
pub fn aggregate_for_owner(tenants: &[Tenant], period: Period) -> OwnerSummary {
    let (collected, pending_dues) = tenants
        .iter()
        .filter_map(|t| payment_for_period(t, period))
        .fold((0.0, 0.0), |(collected, pending), p| {
            (collected + p.amount_paid, pending + p.outstanding())
        });

    OwnerSummary {
        period,
        total_tenants: tenants.len(),
        collected,
        pending_dues,
    }
}

/// Status rows for an owner's tenant list
pub fn tenant_overview(tenants: &[Tenant], period: Period) -> Vec<TenantStatusRow> {
    tenants
        .iter()
        .map(|t| {
            let status = current_period_status(t, period);
            TenantStatusRow {
                id: t.id,
                name: t.name.clone(),
                email: t.email.clone(),
                house_number: t.house_number.clone(),
                status,
                status_label: status.label().to_string(),
            }
        })
        .collect()
}

/// The tenant's payments matching `filter`, newest period first
///
/// Records for the same period keep their insertion order.
pub fn payment_history(tenant: &Tenant, filter: HistoryFilter) -> Vec<Payment> {
    let mut history: Vec<Payment> = tenant
        .payments
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();
    history.sort_by(|a, b| b.period().cmp(&a.period()));
    history
}
