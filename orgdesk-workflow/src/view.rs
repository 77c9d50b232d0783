//! Presentation model of the organization management screen.
//!
//! [`build_view`] turns a snapshot of workflow state into what the screen
//! renders. It makes no decisions of its own: permissions come from
//! `orgdesk-rbac`, labels from the role and plan enums, and everything else is
//! copied from the snapshot.

use chrono::{DateTime, Datelike, Utc};
use orgdesk_org::{
    AddMemberDraft, BadgeTone, FieldErrors, Member, OrganizationDraft, OrganizationRole,
    OrganizationSummary, RoleTone, StoredUser,
};
use orgdesk_rbac::{is_allowed, OrganizationAction};
use serde::Serialize;
use uuid::Uuid;

use crate::notifications::Notification;

/// Shown in place of a missing date.
pub const DATE_UNAVAILABLE: &str = "Non disponible";

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Everything [`build_view`] needs, copied out of the workflow.
#[derive(Debug, Clone)]
pub struct ViewInputs {
    /// Context is still loading
    pub context_loading: bool,
    /// Current organization
    pub current: Option<OrganizationSummary>,
    /// Signed-in user, display only
    pub viewer: Option<StoredUser>,
    /// Edit mode
    pub editing: bool,
    /// Create modal open
    pub create_open: bool,
    /// Delete confirmation open
    pub delete_open: bool,
    /// Add-member modal open
    pub add_member_open: bool,
    /// Create form contents
    pub create_draft: OrganizationDraft,
    /// Edit form contents
    pub edit_draft: OrganizationDraft,
    /// Add-member form contents
    pub add_member_draft: AddMemberDraft,
    /// Field errors of the last submitted form
    pub validation_errors: FieldErrors,
    /// Member roster of the current organization
    pub members: Vec<Member>,
    /// Loading flags
    pub loading: LoadingFlags,
    /// Visible banner
    pub notification: Option<Notification>,
}

/// One loading flag per operation kind.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LoadingFlags {
    /// Create in flight
    pub creating: bool,
    /// Save in flight
    pub saving: bool,
    /// Delete in flight
    pub deleting: bool,
    /// Add-member in flight
    pub adding_member: bool,
    /// Roster reload in flight
    pub loading_members: bool,
}

/// The screen.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ManagementView {
    /// Spinner while the context loads
    Loading,
    /// Viewer has no organization; only creating one is offered
    Welcome(WelcomePanel),
    /// Viewer's current organization
    Organization(Box<OrganizationPanel>),
}

/// Screen shown to a viewer without an organization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WelcomePanel {
    /// Create modal, when open
    pub create_modal: Option<FormModal>,
    /// Visible banner
    pub notification: Option<Notification>,
    /// Signed-in user
    pub viewer: Option<StoredUser>,
}

/// Role badge.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoleBadge {
    /// Label
    pub label: String,
    /// Icon tone
    pub tone: RoleTone,
}

/// Plan badge.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlanBadge {
    /// Label
    pub label: String,
    /// Colour family
    pub tone: BadgeTone,
}

/// Which controls the viewer gets.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Permissions {
    /// Edit button
    pub can_edit: bool,
    /// Delete button
    pub can_delete: bool,
    /// Add-member button
    pub can_add_member: bool,
}

/// A form shown in a modal or inline.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormModal {
    /// Current contents
    pub draft: OrganizationDraft,
    /// Errors under each field
    pub errors: FieldErrors,
    /// Submit in flight; controls disabled
    pub submitting: bool,
}

/// Add-member modal.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddMemberModal {
    /// Current contents
    pub draft: AddMemberDraft,
    /// Errors under the field
    pub errors: FieldErrors,
    /// Submit in flight
    pub submitting: bool,
    /// Submit button enabled
    pub can_submit: bool,
}

/// Delete confirmation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeleteModal {
    /// Name of the organization about to be deleted
    pub organization_name: String,
    /// Delete in flight
    pub deleting: bool,
}

/// One roster line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MemberRow {
    /// User ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Role badge
    pub role: RoleBadge,
}

/// Screen for the current organization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrganizationPanel {
    /// Organization ID
    pub id: Uuid,
    /// Name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Address
    pub address: Option<String>,
    /// Phone
    pub phone: Option<String>,
    /// Initials
    pub avatar: String,
    /// Viewer's role
    pub role: RoleBadge,
    /// Plan
    pub plan: PlanBadge,
    /// Member count, at least 1
    pub member_count: u32,
    /// Creation date, long French form
    pub created_on: String,
    /// Last update, short French form
    pub updated_on: String,
    /// Offered controls
    pub permissions: Permissions,
    /// Inline edit form, in edit mode
    pub edit_form: Option<FormModal>,
    /// Create modal, when open
    pub create_modal: Option<FormModal>,
    /// Delete confirmation, when open
    pub delete_modal: Option<DeleteModal>,
    /// Add-member modal, when open
    pub add_member_modal: Option<AddMemberModal>,
    /// Roster
    pub members: Vec<MemberRow>,
    /// Roster reload in flight
    pub members_loading: bool,
    /// Visible banner
    pub notification: Option<Notification>,
    /// Signed-in user
    pub viewer: Option<StoredUser>,
}

/// Build the screen from a state snapshot.
pub fn build_view(inputs: ViewInputs) -> ManagementView {
    if inputs.context_loading {
        return ManagementView::Loading;
    }

    let create_modal = inputs.create_open.then(|| FormModal {
        draft: inputs.create_draft.clone(),
        errors: inputs.validation_errors.clone(),
        submitting: inputs.loading.creating,
    });

    let Some(current) = inputs.current else {
        return ManagementView::Welcome(WelcomePanel {
            create_modal,
            notification: inputs.notification,
            viewer: inputs.viewer,
        });
    };

    let role = Some(current.role);
    let permissions = Permissions {
        can_edit: is_allowed(role, OrganizationAction::EditOrganization),
        can_delete: is_allowed(role, OrganizationAction::DeleteOrganization),
        can_add_member: is_allowed(role, OrganizationAction::AddMember),
    };

    let edit_form = inputs.editing.then(|| FormModal {
        draft: inputs.edit_draft.clone(),
        errors: inputs.validation_errors.clone(),
        submitting: inputs.loading.saving,
    });

    let delete_modal = inputs.delete_open.then(|| DeleteModal {
        organization_name: current.name().to_string(),
        deleting: inputs.loading.deleting,
    });

    let add_member_modal = inputs.add_member_open.then(|| AddMemberModal {
        can_submit: inputs.add_member_draft.is_submittable() && !inputs.loading.adding_member,
        draft: inputs.add_member_draft.clone(),
        errors: inputs.validation_errors.clone(),
        submitting: inputs.loading.adding_member,
    });

    let members = inputs
        .members
        .iter()
        .map(|m| MemberRow {
            id: m.id,
            name: m.name.clone(),
            email: m.email.clone(),
            role: role_badge(m.role),
        })
        .collect();

    let org = &current.organization;
    ManagementView::Organization(Box::new(OrganizationPanel {
        id: org.id,
        name: org.name.clone(),
        email: org.email.clone(),
        address: org.address.clone(),
        phone: org.phone.clone(),
        avatar: current.avatar.clone(),
        role: role_badge(current.role),
        plan: PlanBadge {
            label: current.plan.display_label().to_string(),
            tone: current.plan.badge_tone(),
        },
        member_count: current.member_count.max(1),
        created_on: format_long_date(org.created_at),
        updated_on: format_short_date(org.updated_at),
        permissions,
        edit_form,
        create_modal,
        delete_modal,
        add_member_modal,
        members,
        members_loading: inputs.loading.loading_members,
        notification: inputs.notification,
        viewer: inputs.viewer,
    }))
}

fn role_badge(role: OrganizationRole) -> RoleBadge {
    RoleBadge {
        label: role.display_label().to_string(),
        tone: role.tone(),
    }
}

/// Render a date as "15 janvier 2024", or "Non disponible".
pub fn format_long_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => format!("{} {} {}", d.day(), MONTHS_FR[d.month0() as usize], d.year()),
        None => DATE_UNAVAILABLE.to_string(),
    }
}

/// Render a date as "15/01/2024", or "Non disponible".
pub fn format_short_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => DATE_UNAVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use orgdesk_org::{Field, Organization, Plan};

    fn inputs(current: Option<OrganizationSummary>) -> ViewInputs {
        ViewInputs {
            context_loading: false,
            current,
            viewer: None,
            editing: false,
            create_open: false,
            delete_open: false,
            add_member_open: false,
            create_draft: OrganizationDraft::default(),
            edit_draft: OrganizationDraft::default(),
            add_member_draft: AddMemberDraft::default(),
            validation_errors: FieldErrors::new(),
            members: Vec::new(),
            loading: LoadingFlags::default(),
            notification: None,
        }
    }

    fn summary(role: OrganizationRole) -> OrganizationSummary {
        let mut org = Organization::new(Uuid::now_v7(), "Acme Inc", "a@b.com");
        org.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
        let mut summary = OrganizationSummary::provisional(org);
        summary.role = role;
        summary
    }

    fn panel(view: ManagementView) -> OrganizationPanel {
        match view {
            ManagementView::Organization(panel) => *panel,
            other => panic!("expected organization panel, got {other:?}"),
        }
    }

    #[test]
    fn test_loading_wins() {
        let mut i = inputs(Some(summary(OrganizationRole::Owner)));
        i.context_loading = true;
        assert_eq!(build_view(i), ManagementView::Loading);
    }

    #[test]
    fn test_welcome_without_organization() {
        let mut i = inputs(None);
        i.create_open = true;
        match build_view(i) {
            ManagementView::Welcome(panel) => assert!(panel.create_modal.is_some()),
            other => panic!("expected welcome, got {other:?}"),
        }
    }

    #[test]
    fn test_permissions_follow_role() {
        let member = panel(build_view(inputs(Some(summary(OrganizationRole::Member)))));
        assert!(!member.permissions.can_edit);
        assert!(!member.permissions.can_delete);
        assert!(!member.permissions.can_add_member);

        let admin = panel(build_view(inputs(Some(summary(OrganizationRole::Admin)))));
        assert!(admin.permissions.can_edit);
        assert!(!admin.permissions.can_delete);
        assert!(admin.permissions.can_add_member);

        let owner = panel(build_view(inputs(Some(summary(OrganizationRole::Owner)))));
        assert!(owner.permissions.can_delete);
    }

    #[test]
    fn test_labels_and_dates() {
        let mut s = summary(OrganizationRole::Owner);
        s.plan = Plan::Other("legacy".to_string());
        let p = panel(build_view(inputs(Some(s))));

        assert_eq!(p.role.label, "Propriétaire");
        assert_eq!(p.role.tone, RoleTone::Gold);
        assert_eq!(p.plan.label, "legacy");
        assert_eq!(p.plan.tone, BadgeTone::Neutral);
        assert_eq!(p.created_on, "15 janvier 2024");
        assert_eq!(p.updated_on, DATE_UNAVAILABLE);
        assert_eq!(p.avatar, "AI");
    }

    #[test]
    fn test_member_count_has_floor() {
        let mut s = summary(OrganizationRole::Member);
        s.member_count = 0;
        assert_eq!(panel(build_view(inputs(Some(s)))).member_count, 1);
    }

    #[test]
    fn test_add_member_modal_submit_state() {
        let mut i = inputs(Some(summary(OrganizationRole::Admin)));
        i.add_member_open = true;
        let modal = panel(build_view(i.clone())).add_member_modal.unwrap();
        assert!(!modal.can_submit);

        i.add_member_draft = AddMemberDraft::new("x@y.com");
        i.loading.adding_member = true;
        let modal = panel(build_view(i)).add_member_modal.unwrap();
        assert!(!modal.can_submit);
        assert!(modal.submitting);
    }

    #[test]
    fn test_edit_form_shows_errors() {
        let mut i = inputs(Some(summary(OrganizationRole::Admin)));
        i.editing = true;
        i.edit_draft = OrganizationDraft::new("", "x@y.com");
        i.validation_errors = orgdesk_org::validate_organization(&i.edit_draft);

        let form = panel(build_view(i)).edit_form.unwrap();
        assert!(form.errors.contains(Field::Name));
    }

    #[test]
    fn test_date_formats() {
        let date = Utc.with_ymd_and_hms(2023, 8, 3, 0, 0, 0).unwrap();
        assert_eq!(format_long_date(Some(date)), "3 août 2023");
        assert_eq!(format_short_date(Some(date)), "03/08/2023");
        assert_eq!(format_long_date(None), "Non disponible");
    }

    #[test]
    fn test_view_serialization() {
        let json = serde_json::to_value(build_view(inputs(None))).unwrap();
        assert_eq!(json["screen"], "welcome");
        assert!(json["create_modal"].is_null());

        let json = serde_json::to_value(ManagementView::Loading).unwrap();
        assert_eq!(json, serde_json::json!({ "screen": "loading" }));
    }
}
