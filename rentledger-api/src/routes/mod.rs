/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, token refresh and profile
/// - `tenants`: Owner view and edits of tenant details
/// - `family`: Tenant household members
/// - `payments`: Payment records, period status and history
/// - `messages`: Owner-to-tenant messages
/// - `dashboard`: Owner aggregates for a period
/// - `me`: A tenant's own data

use rentledger_shared::error::LedgerResult;
use rentledger_shared::ledger::period::Period;
use rentledger_shared::ledger::summary::HistoryFilter;
use serde::Deserialize;

pub mod auth;
pub mod dashboard;
pub mod family;
pub mod health;
pub mod me;
pub mod messages;
pub mod payments;
pub mod tenants;

/// Optional `?month=&year=` query
///
/// As a period selector, missing values fall back to today's month and year.
/// As a history filter, missing values mean "any".
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// Resolves to a concrete period, defaulting to the current one
    pub fn period(self) -> LedgerResult<Period> {
        Period::resolve(self.month, self.year)
    }

    /// Uses the query as a payment history filter
    pub fn filter(self) -> HistoryFilter {
        HistoryFilter {
            year: self.year,
            month: self.month,
        }
    }
}
