/// Demo data for local development
///
/// Installs one owner (`owner@test.com`) with two tenants. Alice Smith
/// (A-101) has a household of two, has paid the current and previous
/// periods in full, and has one reminder. Michael Johnson (B-204) has a
/// partial payment for the current period. Every account's password is
/// `password`.

use chrono::{DateTime, TimeZone, Utc};
use tracing::info;
use uuid::Uuid;

use super::RecordStore;
use crate::auth::password::hash_password;
use crate::error::LedgerResult;
use crate::ledger::engine::add_payment;
use crate::ledger::payment::PaymentInput;
use crate::ledger::period::Period;
use crate::models::family_member::NewFamilyMember;
use crate::models::message::Message;
use crate::models::tenant::Tenant;
use crate::models::user::{Role, User};

/// Email of the seeded owner account
pub const DEMO_OWNER_EMAIL: &str = "owner@test.com";

/// Password of every seeded account
pub const DEMO_PASSWORD: &str = "password";

/// Seeds the demo accounts with `period` as the current billing period
///
/// Does nothing when the demo owner already exists. Returns the owner's ID
/// when data was inserted.
pub async fn seed_demo_data(
    store: &dyn RecordStore,
    period: Period,
) -> LedgerResult<Option<Uuid>> {
    if store.find_user_by_email(DEMO_OWNER_EMAIL).await?.is_some() {
        info!("Demo data already present, skipping seed");
        return Ok(None);
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;

    let owner = User::new("John Doe", DEMO_OWNER_EMAIL, &password_hash, Role::Owner);
    let owner = store.create_user(owner, None).await?;

    let alice = User::new("Alice Smith", "tenant1@test.com", &password_hash, Role::Tenant);
    let mut alice_doc = Tenant::for_user(&alice, "A-101".to_string(), owner.id);
    alice_doc.add_family_member(NewFamilyMember {
        name: "Bob Smith".to_string(),
        age: 45,
        relation: "Spouse".to_string(),
    });
    alice_doc.add_family_member(NewFamilyMember {
        name: "Charlie Smith".to_string(),
        age: 12,
        relation: "Son".to_string(),
    });
    add_payment(
        &mut alice_doc,
        dated(PaymentInput::new(period, 15000.0, 1200.0, 300.0, 16500.0), period, 5),
        Utc::now(),
    )?;
    let previous = period.previous();
    add_payment(
        &mut alice_doc,
        dated(PaymentInput::new(previous, 15000.0, 1150.0, 300.0, 16450.0), previous, 5),
        Utc::now(),
    )?;
    alice_doc.receive_message(Message::from_owner(
        "Reminder: Rent for this month is due on the 5th.",
    ));
    store.create_user(alice, Some(alice_doc)).await?;

    let michael = User::new("Michael Johnson", "tenant2@test.com", &password_hash, Role::Tenant);
    let mut michael_doc = Tenant::for_user(&michael, "B-204".to_string(), owner.id);
    add_payment(
        &mut michael_doc,
        dated(PaymentInput::new(period, 18000.0, 1500.0, 400.0, 10000.0), period, 6),
        Utc::now(),
    )?;
    store.create_user(michael, Some(michael_doc)).await?;

    info!(owner_id = %owner.id, %period, "Seeded demo data");
    Ok(Some(owner.id))
}

fn dated(mut input: PaymentInput, period: Period, day: u32) -> PaymentInput {
    input.payment_date = day_of(period, day);
    input
}

fn day_of(period: Period, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(period.year, period.month, day, 0, 0, 0)
        .single()
}
