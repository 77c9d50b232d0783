//! Organization domain models
//!
//! This module provides the organization record as returned by the backend and
//! the viewer-specific summary the client keeps in its shared context.
//! The backend is authoritative for both; the summary only adds the fields the
//! screen needs (avatar, viewer role, plan, member count).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plans::Plan;
use crate::roles::OrganizationRole;

/// An organization as returned by the organization API.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use orgdesk_org::Organization;
///
/// let org = Organization::new(Uuid::now_v7(), "Acme Inc", "contact@acme.com");
/// assert_eq!(org.name, "Acme Inc");
/// assert!(org.address.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    /// Unique identifier for the organization
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// When the organization was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the organization was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Organization {
    /// Creates an organization record with only the required fields set.
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            address: None,
            phone: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// An organization as seen by the current viewer.
///
/// This is what the shared context holds: the backend record plus the
/// viewer's role, the subscription plan, the member count and the avatar
/// initials shown in the header.
///
/// `role`, `plan` and `member_count` are projections supplied by the backend.
/// The only place the client fills them in itself is [`OrganizationSummary::provisional`],
/// whose values are replaced by the authoritative reload that follows a create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizationSummary {
    /// Backend record
    #[serde(flatten)]
    pub organization: Organization,

    /// Initials shown in the header
    #[serde(default)]
    pub avatar: String,

    /// Viewer's role in this organization
    #[serde(default)]
    pub role: OrganizationRole,

    /// Subscription plan
    #[serde(default)]
    pub plan: Plan,

    /// Number of members
    #[serde(default = "default_member_count", rename = "memberCount", alias = "member_count")]
    pub member_count: u32,
}

fn default_member_count() -> u32 {
    1
}

impl OrganizationSummary {
    /// Build the provisional summary for an organization the viewer just created.
    ///
    /// The viewer becomes `Owner`, the plan defaults to `Professional`, the
    /// member count is 1 and the avatar is derived from the name. These are
    /// best-effort guesses until the authoritative reload lands.
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use orgdesk_org::{Organization, OrganizationRole, OrganizationSummary};
    ///
    /// let record = Organization::new(Uuid::now_v7(), "Acme Inc", "a@b.com");
    /// let summary = OrganizationSummary::provisional(record);
    /// assert_eq!(summary.avatar, "AI");
    /// assert_eq!(summary.role, OrganizationRole::Owner);
    /// assert_eq!(summary.member_count, 1);
    /// ```
    pub fn provisional(organization: Organization) -> Self {
        let avatar = derive_avatar(&organization.name);
        Self {
            organization,
            avatar,
            role: OrganizationRole::Owner,
            plan: Plan::Professional,
            member_count: 1,
        }
    }

    /// Merge an updated backend record into this summary.
    ///
    /// Every record field is replaced; avatar, role, plan and member count are
    /// kept from the current value because the update endpoint does not return them.
    pub fn merge_update(&self, updated: Organization) -> Self {
        Self {
            organization: updated,
            avatar: self.avatar.clone(),
            role: self.role,
            plan: self.plan.clone(),
            member_count: self.member_count,
        }
    }

    /// Organization ID
    pub fn id(&self) -> Uuid {
        self.organization.id
    }

    /// Organization name
    pub fn name(&self) -> &str {
        &self.organization.name
    }
}

/// Derive avatar initials from an organization name.
///
/// Takes the first character of each word, uppercases the result and keeps at
/// most two characters.
///
/// # Examples
///
/// ```
/// use orgdesk_org::derive_avatar;
///
/// assert_eq!(derive_avatar("Acme Inc"), "AI");
/// assert_eq!(derive_avatar("la grande maison bleue"), "LG");
/// assert_eq!(derive_avatar("solo"), "S");
/// ```
pub fn derive_avatar(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect();
    initials.to_uppercase().chars().take(2).collect()
}
