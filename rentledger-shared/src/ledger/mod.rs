/// Ledger engine
///
/// Maintains the derived-field invariant on payment records and answers
/// aggregate queries. Everything here is synchronous and operates on
/// values already in memory; persistence is the record store's concern.
///
/// # Modules
///
/// - [`period`]: (month, year) billing periods
/// - [`payment`]: payment records, inputs and derived-field computation
/// - [`engine`]: add/update/remove on a tenant's ledger
/// - [`summary`]: status classification, owner aggregates, history

pub mod engine;
pub mod payment;
pub mod period;
pub mod summary;

pub use engine::{add_payment, find_payment, remove_payment, update_payment};
pub use payment::{compute_derived, Derived, Payment, PaymentInput, PaymentUpdate};
pub use period::Period;
pub use summary::{
    aggregate_for_owner, current_period_status, payment_history, tenant_overview, HistoryFilter,
    OwnerSummary, PeriodStatus, TenantStatusRow,
};
