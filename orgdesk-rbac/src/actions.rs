//! # Actions
//!
//! Defines the organization actions a viewer can attempt from the management screen.

use serde::{Deserialize, Serialize};

/// Actions that can be performed from the organization management screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationAction {
    /// See the current organization's details.
    ViewOrganization,

    /// Create a new organization.
    ///
    /// Available without any membership, since it is how a viewer gets one.
    CreateOrganization,

    /// Edit name, email, address and phone.
    EditOrganization,

    /// Permanently delete the organization.
    DeleteOrganization,

    /// Add an existing account to the organization by email.
    AddMember,

    /// See the member roster.
    ViewMembers,
}

impl OrganizationAction {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewOrganization => "view_organization",
            Self::CreateOrganization => "create_organization",
            Self::EditOrganization => "edit_organization",
            Self::DeleteOrganization => "delete_organization",
            Self::AddMember => "add_member",
            Self::ViewMembers => "view_members",
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Self::ViewOrganization,
            Self::CreateOrganization,
            Self::EditOrganization,
            Self::DeleteOrganization,
            Self::AddMember,
            Self::ViewMembers,
        ]
    }
}

impl std::fmt::Display for OrganizationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
