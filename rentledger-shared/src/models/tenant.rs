/// Tenant model
///
/// A tenant is a renter managed by exactly one owner. The tenant document
/// carries its household (family members), its payment ledger and the
/// messages the owner has sent to it, mirroring a single document in the
/// record store.
///
/// # Storage shape
///
/// ```sql
/// -- tenant columns on the users table
/// house_number   VARCHAR(64),
/// owner_id       UUID REFERENCES users(id),
/// family_members JSONB NOT NULL DEFAULT '[]',
/// payments       JSONB NOT NULL DEFAULT '[]',
/// messages       JSONB NOT NULL DEFAULT '[]'
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::family_member::FamilyMember;
use super::message::Message;
use super::user::User;
use crate::ledger::payment::Payment;

/// Tenant document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Tenant ID (same as the tenant's user ID)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Contact/login email
    pub email: String,

    /// House or unit number, e.g. "A-101"
    pub house_number: String,

    /// Owning landlord's user ID
    pub owner_id: Uuid,

    /// Household members, in insertion order
    pub family_members: Vec<FamilyMember>,

    /// Payment ledger, in insertion order
    pub payments: Vec<Payment>,

    /// Messages received from the owner, oldest first
    pub messages: Vec<Message>,

    /// When the tenant signed up
    pub created_at: DateTime<Utc>,

    /// When the document last changed
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Creates an empty tenant profile for a freshly registered tenant user
    pub fn for_user(user: &User, house_number: String, owner_id: Uuid) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            house_number,
            owner_id,
            family_members: Vec::new(),
            payments: Vec::new(),
            messages: Vec::new(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    /// Whether `owner_id` owns this tenant
    pub fn is_owned_by(&self, owner_id: Uuid) -> bool {
        self.owner_id == owner_id
    }

    /// Bumps `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Applies an owner edit to the tenant's details
    ///
    /// Absent or blank values keep the prior value.
    pub fn apply_update(&mut self, update: &TenantUpdate) {
        if let Some(name) = non_blank(&update.name) {
            self.name = name.to_string();
        }
        if let Some(email) = non_blank(&update.email) {
            self.email = email.trim().to_lowercase();
        }
        if let Some(house) = non_blank(&update.house_number) {
            self.house_number = house.to_string();
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Owner edit of a tenant's details
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TenantUpdate {
    /// New display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New house number
    #[validate(length(max = 64, message = "House number must be at most 64 characters"))]
    pub house_number: Option<String>,
}
