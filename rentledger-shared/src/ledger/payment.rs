/// Payment records and their derived fields
///
/// A [`Payment`] stores three charge components and the amount paid. The
/// `total_due` and `balance` fields are derived from those four inputs and
/// are only ever written by [`Payment::recompute`], so they cannot drift
/// from the formula:
///
/// ```text
/// total_due = rent + electricity_bill + water_charge
/// balance   = total_due - amount_paid        (signed; negative = overpaid)
/// ```
///
/// # Example
///
/// ```
/// use rentledger_shared::ledger::payment::compute_derived;
///
/// let derived = compute_derived(15000.0, 1200.0, 300.0, 16500.0);
/// assert_eq!(derived.total_due, 16500.0);
/// assert_eq!(derived.balance, 0.0);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::Period;
use super::summary::PeriodStatus;
use crate::error::{LedgerError, LedgerResult};

/// Derived ledger amounts for one payment record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    /// Sum of the three charge components
    pub total_due: f64,

    /// `total_due - amount_paid`; negative when overpaid
    pub balance: f64,
}

/// Computes `total_due` and `balance` from the raw amounts
///
/// Pure function. The balance is never clamped.
pub fn compute_derived(
    rent: f64,
    electricity_bill: f64,
    water_charge: f64,
    amount_paid: f64,
) -> Derived {
    let total_due = rent + electricity_bill + water_charge;
    Derived {
        total_due,
        balance: total_due - amount_paid,
    }
}

/// One billing-period ledger entry for a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment record ID
    pub id: Uuid,

    /// Billing month, 1-12
    pub month: u32,

    /// Billing year
    pub year: i32,

    /// Monthly rent
    pub rent: f64,

    /// Electricity charge for the month
    pub electricity_bill: f64,

    /// Water charge for the month
    pub water_charge: f64,

    /// Derived: rent + electricity + water
    pub total_due: f64,

    /// Amount the tenant has paid toward this period
    pub amount_paid: f64,

    /// Derived: total_due - amount_paid
    pub balance: f64,

    /// When the entry was recorded
    pub payment_date: DateTime<Utc>,
}

impl Payment {
    /// The billing period this record belongs to
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }

    /// Whether this record belongs to `period`
    pub fn is_for(&self, period: Period) -> bool {
        self.month == period.month && self.year == period.year
    }

    /// Rewrites `total_due` and `balance` from the current inputs
    pub fn recompute(&mut self) {
        let derived = compute_derived(
            self.rent,
            self.electricity_bill,
            self.water_charge,
            self.amount_paid,
        );
        self.total_due = derived.total_due;
        self.balance = derived.balance;
    }

    /// Rejects records whose derived fields overflowed to infinity
    pub(crate) fn check_derived(&self) -> LedgerResult<()> {
        if !self.total_due.is_finite() {
            return Err(LedgerError::validation(
                "totalDue",
                "rent, electricityBill and waterCharge add up to a non-finite total",
            ));
        }
        if !self.balance.is_finite() {
            return Err(LedgerError::validation("balance", "balance is not a finite number"));
        }
        Ok(())
    }

    /// Outstanding amount for this record, never below zero
    pub fn outstanding(&self) -> f64 {
        (self.total_due - self.amount_paid).max(0.0)
    }

    /// Classifies this record as paid, partially paid or due
    pub fn status(&self) -> PeriodStatus {
        if self.amount_paid >= self.total_due {
            PeriodStatus::Paid
        } else if self.amount_paid > 0.0 {
            PeriodStatus::Partial
        } else {
            PeriodStatus::Due
        }
    }
}

/// Input for recording a new payment
///
/// Every amount is optional at the type level so that a missing field is
/// reported as a validation error naming that field, rather than as a
/// deserialization failure. Derived fields are not accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub rent: Option<f64>,
    pub electricity_bill: Option<f64>,
    pub water_charge: Option<f64>,
    pub amount_paid: Option<f64>,

    /// Capture time; defaults to the time the record is added
    pub payment_date: Option<DateTime<Utc>>,
}

impl PaymentInput {
    /// Convenience constructor with every required field supplied
    pub fn new(
        period: Period,
        rent: f64,
        electricity_bill: f64,
        water_charge: f64,
        amount_paid: f64,
    ) -> Self {
        Self {
            month: Some(period.month),
            year: Some(period.year),
            rent: Some(rent),
            electricity_bill: Some(electricity_bill),
            water_charge: Some(water_charge),
            amount_paid: Some(amount_paid),
            payment_date: None,
        }
    }

    /// Validates the input and builds a record with derived fields filled in
    pub(crate) fn into_payment(self, now: DateTime<Utc>) -> LedgerResult<Payment> {
        let month = self
            .month
            .ok_or_else(|| LedgerError::validation("month", "month is required"))?;
        let year = self
            .year
            .ok_or_else(|| LedgerError::validation("year", "year is required"))?;
        let period = Period::new(month, year)?;

        let rent = require_amount("rent", self.rent)?;
        let electricity_bill = require_amount("electricityBill", self.electricity_bill)?;
        let water_charge = require_amount("waterCharge", self.water_charge)?;
        let amount_paid = require_amount("amountPaid", self.amount_paid)?;

        let mut payment = Payment {
            id: Uuid::new_v4(),
            month: period.month,
            year: period.year,
            rent,
            electricity_bill,
            water_charge,
            total_due: 0.0,
            amount_paid,
            balance: 0.0,
            payment_date: self.payment_date.unwrap_or(now),
        };
        payment.recompute();
        payment.check_derived()?;
        Ok(payment)
    }
}

/// Partial update for an existing payment
///
/// Unsupplied fields keep their prior values. Month and year are fixed once
/// a record exists. Any `totalDue`/`balance` sent by a client is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    pub rent: Option<f64>,
    pub electricity_bill: Option<f64>,
    pub water_charge: Option<f64>,
    pub amount_paid: Option<f64>,
    pub payment_date: Option<DateTime<Utc>>,
}

impl PaymentUpdate {
    /// Checks every supplied amount before anything is applied
    pub(crate) fn validate(&self) -> LedgerResult<()> {
        check_optional("rent", self.rent)?;
        check_optional("electricityBill", self.electricity_bill)?;
        check_optional("waterCharge", self.water_charge)?;
        check_optional("amountPaid", self.amount_paid)?;
        Ok(())
    }

    /// Merges onto `payment` and recomputes derived fields
    ///
    /// Callers must run [`PaymentUpdate::validate`] first and check the
    /// derived fields before keeping the result.
    pub(crate) fn apply_to(&self, payment: &mut Payment) {
        if let Some(rent) = self.rent {
            payment.rent = rent;
        }
        if let Some(bill) = self.electricity_bill {
            payment.electricity_bill = bill;
        }
        if let Some(water) = self.water_charge {
            payment.water_charge = water;
        }
        if let Some(paid) = self.amount_paid {
            payment.amount_paid = paid;
        }
        if let Some(date) = self.payment_date {
            payment.payment_date = date;
        }
        payment.recompute();
    }
}

fn require_amount(field: &str, value: Option<f64>) -> LedgerResult<f64> {
    let value = value.ok_or_else(|| LedgerError::validation(field, format!("{} is required", field)))?;
    check_amount(field, value)?;
    Ok(value)
}

fn check_optional(field: &str, value: Option<f64>) -> LedgerResult<()> {
    match value {
        Some(v) => check_amount(field, v),
        None => Ok(()),
    }
}

fn check_amount(field: &str, value: f64) -> LedgerResult<()> {
    if !value.is_finite() {
        return Err(LedgerError::validation(field, format!("{} must be a finite number", field)));
    }
    if value < 0.0 {
        return Err(LedgerError::validation(field, format!("{} must not be negative", field)));
    }
    Ok(())
}
