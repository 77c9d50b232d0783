//! # Orgdesk RBAC (Role-Based Access Control)
//!
//! This crate is the single place where Orgdesk decides whether the viewer's
//! role allows an organization action. Both the view model (which controls to
//! show) and the workflow (which calls to dispatch) ask the same function, so
//! the two cannot drift apart.
//!
//! The check is a user-experience gate only. The organization API enforces
//! authorization on its own; nothing here is a security boundary.
//!
//! ## Rules
//!
//! ```text
//! Action               Required role
//! ──────────────────   ─────────────
//! create_organization  none (no membership needed)
//! view_organization    member
//! view_members         member
//! edit_organization    admin
//! add_member           admin
//! delete_organization  owner
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use orgdesk_org::OrganizationRole;
//! use orgdesk_rbac::{authorize, is_allowed, OrganizationAction};
//!
//! assert!(is_allowed(Some(OrganizationRole::Admin), OrganizationAction::AddMember));
//!
//! let denied = authorize(Some(OrganizationRole::Admin), OrganizationAction::DeleteOrganization);
//! assert_eq!(
//!     denied.unwrap_err().to_string(),
//!     "Seul le propriétaire peut supprimer l'organisation"
//! );
//! ```

pub mod actions;
pub mod permissions;

// Re-export main types for convenience
pub use actions::OrganizationAction;
pub use permissions::{authorize, is_allowed, required_role, PermissionDenied};
