/// Payment mutations on a tenant's ledger
///
/// Each operation validates its input before touching the tenant, so a
/// failed call leaves the payment collection exactly as it was.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use rentledger_shared::ledger::{engine, payment::{PaymentInput, PaymentUpdate}, period::Period};
/// # use rentledger_shared::models::{tenant::Tenant, user::{Role, User}};
/// # let user = User::new("Alice", "alice@test.com", "hash", Role::Tenant);
/// # let mut tenant = Tenant::for_user(&user, "A-101".into(), uuid::Uuid::new_v4());
///
/// let period = Period::new(6, 2025)?;
/// let payment = engine::add_payment(
///     &mut tenant,
///     PaymentInput::new(period, 18000.0, 1500.0, 400.0, 10000.0),
///     Utc::now(),
/// )?;
/// assert_eq!(payment.balance, 9900.0);
///
/// let update = PaymentUpdate { amount_paid: Some(19900.0), ..Default::default() };
/// let payment = engine::update_payment(&mut tenant, payment.id, update)?;
/// assert_eq!(payment.balance, 0.0);
/// # Ok::<(), rentledger_shared::error::LedgerError>(())
/// ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::payment::{Payment, PaymentInput, PaymentUpdate};
use crate::error::{LedgerError, LedgerResult};
use crate::models::tenant::Tenant;

/// Appends a validated payment record to the tenant's ledger
///
/// `now` is used as the capture timestamp when the input carries none.
///
/// # Errors
///
/// `LedgerError::Validation` if month, year or any of the four amounts is
/// missing, non-finite or negative, or if the charges sum to a non-finite
/// total.
pub fn add_payment(
    tenant: &mut Tenant,
    input: PaymentInput,
    now: DateTime<Utc>,
) -> LedgerResult<Payment> {
    let payment = input.into_payment(now)?;
    tenant.payments.push(payment.clone());
    tenant.touch();
    Ok(payment)
}

/// Merges `update` onto an existing record and recomputes derived fields
///
/// # Errors
///
/// - `LedgerError::Validation` if a supplied amount is non-finite or negative,
///   or the recomputed total overflows
/// - `LedgerError::NotFound` if `payment_id` is not on this tenant
pub fn update_payment(
    tenant: &mut Tenant,
    payment_id: Uuid,
    update: PaymentUpdate,
) -> LedgerResult<Payment> {
    update.validate()?;

    let slot = tenant
        .payments
        .iter_mut()
        .find(|p| p.id == payment_id)
        .ok_or_else(|| LedgerError::not_found("Payment", payment_id))?;

    let mut updated = slot.clone();
    update.apply_to(&mut updated);
    updated.check_derived()?;

    *slot = updated.clone();
    tenant.touch();
    Ok(updated)
}

/// Deletes a record from the ledger and returns it
///
/// # Errors
///
/// `LedgerError::NotFound` if `payment_id` is not on this tenant
pub fn remove_payment(tenant: &mut Tenant, payment_id: Uuid) -> LedgerResult<Payment> {
    let index = tenant
        .payments
        .iter()
        .position(|p| p.id == payment_id)
        .ok_or_else(|| LedgerError::not_found("Payment", payment_id))?;

    let removed = tenant.payments.remove(index);
    tenant.touch();
    Ok(removed)
}

/// Looks up a record by ID
pub fn find_payment(tenant: &Tenant, payment_id: Uuid) -> LedgerResult<&Payment> {
    tenant
        .payments
        .iter()
        .find(|p| p.id == payment_id)
        .ok_or_else(|| LedgerError::not_found("Payment", payment_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::period::Period;
    use crate::models::user::{Role, User};

    fn tenant() -> Tenant {
        let user = User::new("Michael Johnson", "tenant2@test.com", "hash", Role::Tenant);
        Tenant::for_user(&user, "B-204".to_string(), Uuid::new_v4())
    }

    fn june() -> Period {
        Period::new(6, 2025).unwrap()
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut t = tenant();
        let first = add_payment(&mut t, PaymentInput::new(june().previous(), 1.0, 0.0, 0.0, 1.0), Utc::now()).unwrap();
        let second = add_payment(&mut t, PaymentInput::new(june(), 2.0, 0.0, 0.0, 0.0), Utc::now()).unwrap();

        assert_eq!(t.payments.len(), 2);
        assert_eq!(t.payments[0].id, first.id);
        assert_eq!(t.payments[1].id, second.id);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_add_validation_failure_leaves_ledger_untouched() {
        let mut t = tenant();
        let mut input = PaymentInput::new(june(), 1.0, 1.0, 1.0, 1.0);
        input.amount_paid = None;

        let before = t.clone();
        assert!(add_payment(&mut t, input, Utc::now()).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn test_update_merges_and_recomputes() {
        let mut t = tenant();
        let p = add_payment(&mut t, PaymentInput::new(june(), 18000.0, 1500.0, 400.0, 10000.0), Utc::now()).unwrap();

        let updated = update_payment(
            &mut t,
            p.id,
            PaymentUpdate {
                electricity_bill: Some(1600.0),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.rent, 18000.0);
        assert_eq!(updated.total_due, 20000.0);
        assert_eq!(updated.balance, 10000.0);
        assert_eq!(t.payments[0], updated);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut t = tenant();
        let p = add_payment(&mut t, PaymentInput::new(june(), 100.0, 10.0, 5.0, 0.0), Utc::now()).unwrap();
        let update = PaymentUpdate {
            amount_paid: Some(60.0),
            ..Default::default()
        };

        let once = update_payment(&mut t, p.id, update.clone()).unwrap();
        let twice = update_payment(&mut t, p.id, update).unwrap();

        assert_eq!(once.total_due, twice.total_due);
        assert_eq!(once.balance, twice.balance);
    }

    #[test]
    fn test_update_unknown_id_leaves_ledger_untouched() {
        let mut t = tenant();
        add_payment(&mut t, PaymentInput::new(june(), 100.0, 0.0, 0.0, 0.0), Utc::now()).unwrap();
        let before = t.payments.clone();

        let err = update_payment(
            &mut t,
            Uuid::new_v4(),
            PaymentUpdate {
                amount_paid: Some(100.0),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, LedgerError::NotFound { entity: "Payment", .. }));
        assert_eq!(t.payments, before);
    }

    #[test]
    fn test_update_invalid_amount_leaves_record_untouched() {
        let mut t = tenant();
        let p = add_payment(&mut t, PaymentInput::new(june(), 100.0, 0.0, 0.0, 0.0), Utc::now()).unwrap();

        let err = update_payment(
            &mut t,
            p.id,
            PaymentUpdate {
                rent: Some(200.0),
                amount_paid: Some(f64::NAN),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, LedgerError::Validation { .. }));
        assert_eq!(t.payments[0], p);
    }

    #[test]
    fn test_add_rejects_overflowing_total() {
        let mut t = tenant();
        let before = t.clone();

        let err = add_payment(&mut t, PaymentInput::new(june(), 1e308, 1e308, 0.0, 0.0), Utc::now())
            .unwrap_err();

        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "totalDue"));
        assert_eq!(t, before);
    }

    #[test]
    fn test_update_rejects_overflowing_total() {
        let mut t = tenant();
        let p = add_payment(&mut t, PaymentInput::new(june(), 1e308, 0.0, 0.0, 0.0), Utc::now()).unwrap();

        let err = update_payment(
            &mut t,
            p.id,
            PaymentUpdate {
                electricity_bill: Some(1e308),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "totalDue"));
        assert_eq!(t.payments[0], p);
        assert!(serde_json::to_value(&t.payments[0]).unwrap()["totalDue"].is_number());
    }

    #[test]
    fn test_remove_then_lookup_is_not_found() {
        let mut t = tenant();
        let p = add_payment(&mut t, PaymentInput::new(june(), 100.0, 0.0, 0.0, 0.0), Utc::now()).unwrap();

        let removed = remove_payment(&mut t, p.id).unwrap();
        assert_eq!(removed.id, p.id);
        assert!(matches!(find_payment(&t, p.id), Err(LedgerError::NotFound { .. })));
        assert!(matches!(remove_payment(&mut t, p.id), Err(LedgerError::NotFound { .. })));
    }
}
