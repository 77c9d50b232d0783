//! Membership domain models
//!
//! This module provides the roster entries returned by the organization API,
//! the payload returned when a user is added by email, and the locally cached
//! signed-in user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::OrganizationRole;

/// A member of an organization.
///
/// The roster is owned by the backend; the client keeps a transient copy per
/// organization and replaces it wholesale on reload.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use orgdesk_org::{Member, OrganizationRole};
///
/// let member = Member::new(Uuid::now_v7(), "Jeanne Martin", "jeanne@acme.com", OrganizationRole::Admin);
/// assert!(member.role.is_admin());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role within the organization
    #[serde(default)]
    pub role: OrganizationRole,
}

impl Member {
    /// Creates a new roster entry.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
        role: OrganizationRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

/// User returned by the add-by-email endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedUser {
    /// User ID, when the backend returns it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role granted in the organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<OrganizationRole>,
}

/// Response of the add-by-email endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddUserResponse {
    /// The user that was added
    pub user: AddedUser,

    /// Optional confirmation message from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The signed-in user as cached locally by the authentication layer.
///
/// Display only: it never drives authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_defaults_to_member() {
        let json = serde_json::json!({
            "id": Uuid::now_v7(),
            "name": "Paul",
            "email": "paul@acme.com",
        });
        let member: Member = serde_json::from_value(json).unwrap();
        assert_eq!(member.role, OrganizationRole::Member);
    }

    #[test]
    fn test_add_user_response_minimal() {
        let json = serde_json::json!({
            "user": { "name": "Paul", "email": "paul@acme.com" }
        });
        let response: AddUserResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.user.name, "Paul");
        assert!(response.user.id.is_none());
        assert!(response.message.is_none());
    }
}
