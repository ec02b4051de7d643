/// Family members of a tenant household
///
/// Family members are owned by exactly one tenant and are edited
/// independently of the payment ledger.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::tenant::Tenant;
use crate::error::{LedgerError, LedgerResult};

/// A member of a tenant's household
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    /// Member ID
    pub id: Uuid,

    /// Full name
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Relation to the tenant, e.g. "Spouse"
    pub relation: String,
}

/// Input for adding a family member
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFamilyMember {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: String,

    #[validate(range(max = 150, message = "Age must be at most 150"))]
    pub age: u32,

    #[validate(length(min = 1, max = 50, message = "Relation must be 1-50 characters"))]
    #[validate(custom(function = "not_blank", message = "Relation must not be blank"))]
    pub relation: String,
}

/// Partial edit of a family member
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberUpdate {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: Option<String>,

    #[validate(range(max = 150, message = "Age must be at most 150"))]
    pub age: Option<u32>,

    #[validate(length(min = 1, max = 50, message = "Relation must be 1-50 characters"))]
    #[validate(custom(function = "not_blank", message = "Relation must not be blank"))]
    pub relation: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl Tenant {
    /// Appends a family member and returns it
    pub fn add_family_member(&mut self, member: NewFamilyMember) -> FamilyMember {
        let member = FamilyMember {
            id: Uuid::new_v4(),
            name: member.name.trim().to_string(),
            age: member.age,
            relation: member.relation.trim().to_string(),
        };
        self.family_members.push(member.clone());
        self.touch();
        member
    }

    /// Merges `update` onto the member with `member_id`
    pub fn update_family_member(
        &mut self,
        member_id: Uuid,
        update: FamilyMemberUpdate,
    ) -> LedgerResult<FamilyMember> {
        let member = self
            .family_members
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| LedgerError::not_found("Family member", member_id))?;

        if let Some(name) = update.name {
            member.name = name.trim().to_string();
        }
        if let Some(age) = update.age {
            member.age = age;
        }
        if let Some(relation) = update.relation {
            member.relation = relation.trim().to_string();
        }

        let updated = member.clone();
        self.touch();
        Ok(updated)
    }

    /// Removes the member with `member_id`
    pub fn remove_family_member(&mut self, member_id: Uuid) -> LedgerResult<FamilyMember> {
        let index = self
            .family_members
            .iter()
            .position(|m| m.id == member_id)
            .ok_or_else(|| LedgerError::not_found("Family member", member_id))?;

        let removed = self.family_members.remove(index);
        self.touch();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, User};

    fn tenant() -> Tenant {
        let user = User::new("Alice", "alice@test.com", "hash", Role::Tenant);
        Tenant::for_user(&user, "A-101".to_string(), Uuid::new_v4())
    }

    fn spouse() -> NewFamilyMember {
        NewFamilyMember {
            name: "Bob Smith".to_string(),
            age: 45,
            relation: "Spouse".to_string(),
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut t = tenant();
        let bob = t.add_family_member(spouse());
        assert_eq!(t.family_members.len(), 1);

        let removed = t.remove_family_member(bob.id).unwrap();
        assert_eq!(removed.name, "Bob Smith");
        assert!(t.family_members.is_empty());
    }

    #[test]
    fn test_partial_update() {
        let mut t = tenant();
        let bob = t.add_family_member(spouse());

        let updated = t
            .update_family_member(
                bob.id,
                FamilyMemberUpdate {
                    age: Some(46),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.age, 46);
        assert_eq!(updated.relation, "Spouse");
    }

    #[test]
    fn test_missing_member() {
        let mut t = tenant();
        t.add_family_member(spouse());

        let err = t.remove_family_member(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
        assert_eq!(t.family_members.len(), 1);
    }

    #[test]
    fn test_validation() {
        let mut member = spouse();
        member.name = String::new();
        assert!(member.validate().is_err());
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let mut member = spouse();
        member.relation = "   ".to_string();
        let errors = member.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("relation"));

        let update = FamilyMemberUpdate {
            name: Some("\t ".to_string()),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let update = FamilyMemberUpdate {
            name: Some(" Robert ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
