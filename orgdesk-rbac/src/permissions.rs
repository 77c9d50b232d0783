//! # Permissions
//!
//! The role check shared by the view model and the workflow.

use orgdesk_org::OrganizationRole;
use thiserror::Error;

use crate::actions::OrganizationAction;

/// The viewer's role does not allow the attempted action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PermissionDenied {
    /// Action that was refused.
    pub action: OrganizationAction,
    /// Role the viewer holds, if any.
    pub role: Option<OrganizationRole>,
    /// Message shown in the error banner.
    pub message: String,
}

/// Minimum role needed for `action`, or `None` when no membership is needed.
pub fn required_role(action: OrganizationAction) -> Option<OrganizationRole> {
    match action {
        OrganizationAction::CreateOrganization => None,
        OrganizationAction::ViewOrganization | OrganizationAction::ViewMembers => {
            Some(OrganizationRole::Member)
        }
        OrganizationAction::EditOrganization | OrganizationAction::AddMember => {
            Some(OrganizationRole::Admin)
        }
        OrganizationAction::DeleteOrganization => Some(OrganizationRole::Owner),
    }
}

/// Whether `role` may perform `action`.
///
/// `role` is `None` when the viewer has no current organization.
pub fn is_allowed(role: Option<OrganizationRole>, action: OrganizationAction) -> bool {
    match required_role(action) {
        None => true,
        Some(required) => role.is_some_and(|r| r >= required),
    }
}

/// Check that `role` may perform `action`.
///
/// # Example
///
/// ```
/// use orgdesk_org::OrganizationRole;
/// use orgdesk_rbac::{authorize, OrganizationAction};
///
/// assert!(authorize(Some(OrganizationRole::Owner), OrganizationAction::DeleteOrganization).is_ok());
/// assert!(authorize(Some(OrganizationRole::Member), OrganizationAction::EditOrganization).is_err());
/// ```
pub fn authorize(
    role: Option<OrganizationRole>,
    action: OrganizationAction,
) -> Result<(), PermissionDenied> {
    if is_allowed(role, action) {
        return Ok(());
    }
    Err(PermissionDenied {
        action,
        role,
        message: denial_message(action).to_string(),
    })
}

fn denial_message(action: OrganizationAction) -> &'static str {
    match action {
        OrganizationAction::EditOrganization => {
            "Vous n'avez pas les permissions pour modifier cette organisation"
        }
        OrganizationAction::DeleteOrganization => {
            "Seul le propriétaire peut supprimer l'organisation"
        }
        OrganizationAction::AddMember => {
            "Vous n'avez pas les permissions pour ajouter des membres"
        }
        OrganizationAction::ViewOrganization
        | OrganizationAction::ViewMembers
        | OrganizationAction::CreateOrganization => {
            "Vous n'avez pas accès à cette organisation"
        }
    }
}
