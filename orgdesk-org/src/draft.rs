//! Form drafts
//!
//! Drafts are the unsaved contents of the create, edit and add-member forms.
//! They live as long as their form is open and are never persisted.
//! Converting a draft into a request payload trims every field; blank optional
//! fields become `None` and are left out of the JSON body.

use serde::{Deserialize, Serialize};

use crate::organization::Organization;

/// Draft for the create and edit organization forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrganizationDraft {
    /// Organization name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Postal address, empty when unset
    pub address: String,

    /// Phone number, empty when unset
    pub phone: String,
}

impl OrganizationDraft {
    /// Creates a draft with a name and email and no optional fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Set the postal address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Prefill a draft from an existing organization, for the edit form.
    pub fn from_organization(org: &Organization) -> Self {
        Self {
            name: org.name.clone(),
            email: org.email.clone(),
            address: org.address.clone().unwrap_or_default(),
            phone: org.phone.clone().unwrap_or_default(),
        }
    }

    /// Build the create payload.
    pub fn to_create_data(&self) -> CreateOrganizationData {
        CreateOrganizationData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: non_blank(&self.address),
            phone: non_blank(&self.phone),
        }
    }

    /// Build the update payload.
    pub fn to_update_data(&self) -> UpdateOrganizationData {
        UpdateOrganizationData {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            address: non_blank(&self.address),
            phone: non_blank(&self.phone),
        }
    }
}

/// Draft for the add-member form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddMemberDraft {
    /// Email of the account to add
    pub email: String,
}

impl AddMemberDraft {
    /// Creates a draft for the given email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Whether the submit control should be enabled.
    pub fn is_submittable(&self) -> bool {
        !self.email.is_empty()
    }
}

/// Payload for creating an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrganizationData {
    /// Organization name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload for updating an organization. `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateOrganizationData {
    /// Organization name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_create_data_trims_and_drops_blanks() {
        let draft = OrganizationDraft::new("  Acme Inc ", " a@b.com")
            .with_address("   ")
            .with_phone(" +33 6 12 34 56 78 ");

        let data = draft.to_create_data();
        assert_eq!(data.name, "Acme Inc");
        assert_eq!(data.email, "a@b.com");
        assert!(data.address.is_none());
        assert_eq!(data.phone.as_deref(), Some("+33 6 12 34 56 78"));
    }

    #[test]
    fn test_update_data_omits_missing_fields() {
        let data = OrganizationDraft::new("Acme", "a@b.com").to_update_data();
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["name"], "Acme");
        assert!(json.get("address").is_none());
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_draft_from_organization() {
        let mut org = Organization::new(Uuid::now_v7(), "Acme", "a@b.com");
        org.phone = Some("0612345678".to_string());

        let draft = OrganizationDraft::from_organization(&org);
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.address, "");
        assert_eq!(draft.phone, "0612345678");
    }

    #[test]
    fn test_add_member_draft_submittable() {
        assert!(!AddMemberDraft::default().is_submittable());
        assert!(AddMemberDraft::new("x@y.com").is_submittable());
    }
}
