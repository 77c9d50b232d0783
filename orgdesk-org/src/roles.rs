//! Viewer roles
//!
//! This module defines the role the current viewer holds in an organization.
//! Roles are supplied by the backend; the client only reads them to decide
//! what to show and which actions to offer.

use serde::{Deserialize, Serialize};

/// Role of a user within an organization.
///
/// Roles are hierarchical: Member < Admin < Owner.
///
/// # Permission Model
///
/// - **Member**: Can view the organization and its roster
/// - **Admin**: Can edit organization details and add members
/// - **Owner**: Everything an admin can do, plus deleting the organization
///
/// Unknown role strings coming from the backend fall back to `Member`
/// instead of failing deserialization.
///
/// # Examples
///
/// ```
/// use orgdesk_org::OrganizationRole;
///
/// let admin = OrganizationRole::Admin;
/// assert!(admin.is_admin());
/// assert!(!admin.is_owner());
///
/// let role: OrganizationRole = serde_json::from_str("\"superuser\"").unwrap();
/// assert_eq!(role, OrganizationRole::Member);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OrganizationRole {
    /// Regular member
    Member = 0,

    /// Can manage organization details and members
    Admin = 1,

    /// Full organization control
    Owner = 2,
}

impl OrganizationRole {
    /// Check if this role has admin privileges.
    ///
    /// # Returns
    ///
    /// `true` for Admin and Owner roles
    pub fn is_admin(&self) -> bool {
        *self >= OrganizationRole::Admin
    }

    /// Check if this role is the organization owner.
    pub fn is_owner(&self) -> bool {
        *self == OrganizationRole::Owner
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(OrganizationRole)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use orgdesk_org::OrganizationRole;
    ///
    /// assert_eq!(OrganizationRole::parse("ADMIN"), Some(OrganizationRole::Admin));
    /// assert_eq!(OrganizationRole::parse("viewer"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    /// Parse a role, falling back to `Member` for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Get string representation of the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgdesk_org::OrganizationRole;
    ///
    /// assert_eq!(OrganizationRole::Owner.as_str(), "owner");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Get the label shown next to the role badge.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgdesk_org::OrganizationRole;
    ///
    /// assert_eq!(OrganizationRole::Owner.display_label(), "Propriétaire");
    /// ```
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Owner => "Propriétaire",
            Self::Admin => "Administrateur",
            Self::Member => "Membre",
        }
    }

    /// Get the icon tone used by the role badge.
    pub fn tone(&self) -> RoleTone {
        match self {
            Self::Owner => RoleTone::Gold,
            Self::Admin => RoleTone::Blue,
            Self::Member => RoleTone::Green,
        }
    }
}

impl Default for OrganizationRole {
    fn default() -> Self {
        Self::Member
    }
}

impl From<String> for OrganizationRole {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl std::fmt::Display for OrganizationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon tone for a role badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoleTone {
    /// Crown, owner
    Gold,
    /// Shield, admin
    Blue,
    /// Member
    Green,
    /// No role known
    Gray,
}

/// Tone for an optional role; an absent role renders gray.
pub fn role_tone(role: Option<OrganizationRole>) -> RoleTone {
    role.map(|r| r.tone()).unwrap_or(RoleTone::Gray)
}
