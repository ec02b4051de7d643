/// Domain models for RentLedger
///
/// # Models
///
/// - `user`: accounts, roles and per-role signup payloads
/// - `tenant`: the tenant document (household, ledger, inbox)
/// - `family_member`: household members and their edits
/// - `message`: owner-to-tenant messages and recipients
///
/// Payment records live in [`crate::ledger::payment`] next to the
/// computations that own their derived fields.

pub mod family_member;
pub mod message;
pub mod tenant;
pub mod user;
