//! Organization management workflow.
//!
//! [`OrganizationManager`] sequences every action of the management screen:
//! role gate, draft validation, the backend call, reconciling the shared
//! context, and the banner that reports the outcome.
//!
//! ```text
//! draft ─validate─→ service call ─ok──→ update context ─→ close form ─→ success banner
//!                        │
//!                        └─err─→ error banner (form stays open, draft kept, context untouched)
//! ```
//!
//! Creating is a two-phase commit: the new organization is first written to
//! the context with client-derived fields (owner role, default plan, one
//! member, initials), then overwritten by an authoritative reload.

use std::sync::Arc;

use orgdesk_client::{OrganizationService, ServiceError};
use orgdesk_org::{
    validate_add_member, validate_organization, AddMemberDraft, AddUserResponse, FieldErrors,
    Member, OrganizationContext, OrganizationDraft, OrganizationSummary, StoredUser,
};
use orgdesk_rbac::{authorize, OrganizationAction};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::ManagerConfig;
use crate::error::{WorkflowError, WorkflowResult};
use crate::notifications::{Notification, NotificationCenter};
use crate::operations::{OperationKind, OperationState, OperationTracker};
use crate::view::{build_view, LoadingFlags, ManagementView, ViewInputs};

const CREATED: &str = "Organisation créée avec succès !";
const UPDATED: &str = "Organisation mise à jour avec succès !";
const DELETED: &str = "Organisation supprimée avec succès !";

const CREATE_FAILED: &str = "Échec de la création de l'organisation";
const UPDATE_FAILED: &str = "Échec de la mise à jour de l'organisation";
const DELETE_FAILED: &str = "Échec de la suppression de l'organisation";
const ADD_MEMBER_FAILED: &str = "Échec de l'ajout de l'utilisateur";
const LOAD_MEMBERS_FAILED: &str = "Échec du chargement des membres";
const LOAD_ORGANIZATION_FAILED: &str = "Échec du chargement de l'organisation";

/// Form and modal state of the screen.
#[derive(Debug, Default)]
struct ScreenState {
    editing: bool,
    create_open: bool,
    delete_open: bool,
    add_member_open: bool,
    create_draft: OrganizationDraft,
    edit_draft: OrganizationDraft,
    add_member_draft: AddMemberDraft,
    validation_errors: FieldErrors,
    members: Vec<Member>,
    members_of: Option<Uuid>,
    roster_requested: u64,
    roster_applied: u64,
}

/// Drives the organization management screen.
///
/// All methods take `&self`; state lives behind short-lived locks that are
/// never held across a backend call, so unrelated actions proceed side by side.
pub struct OrganizationManager {
    service: Arc<dyn OrganizationService>,
    context: Arc<OrganizationContext>,
    viewer: Option<StoredUser>,
    screen: Mutex<ScreenState>,
    operations: Mutex<OperationTracker>,
    notifications: Mutex<NotificationCenter>,
}

impl OrganizationManager {
    /// Create a manager over `service` and the shared `context`.
    pub fn new(
        service: Arc<dyn OrganizationService>,
        context: Arc<OrganizationContext>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            service,
            context,
            viewer: None,
            screen: Mutex::new(ScreenState::default()),
            operations: Mutex::new(OperationTracker::new(config.success_display)),
            notifications: Mutex::new(NotificationCenter::new(config.success_display)),
        }
    }

    /// Attach the signed-in user shown on the screen.
    pub fn with_viewer(mut self, viewer: Option<StoredUser>) -> Self {
        self.viewer = viewer;
        self
    }

    /// The shared organization context.
    pub fn context(&self) -> &Arc<OrganizationContext> {
        &self.context
    }

    // ─── Read side ────────────────────────────────────────────────────────

    /// The visible notification, if any.
    pub async fn notification(&self) -> Option<Notification> {
        self.notifications.lock().await.current().cloned()
    }

    /// State of one operation kind.
    pub async fn operation_state(&self, kind: OperationKind) -> OperationState {
        self.operations.lock().await.state(kind)
    }

    /// Field errors of the last submitted form.
    pub async fn validation_errors(&self) -> FieldErrors {
        self.screen.lock().await.validation_errors.clone()
    }

    /// Cached roster of the current organization.
    pub async fn members(&self) -> Vec<Member> {
        self.screen.lock().await.members.clone()
    }

    /// Whether the inline edit form is active.
    pub async fn is_editing(&self) -> bool {
        self.screen.lock().await.editing
    }

    /// Compute the screen.
    pub async fn view(&self) -> ManagementView {
        let context_loading = self.context.is_loading().await;
        let current = self.context.current().await;
        let notification = self.notification().await;
        let loading = {
            let ops = self.operations.lock().await;
            LoadingFlags {
                creating: ops.is_in_flight(OperationKind::Create),
                saving: ops.is_in_flight(OperationKind::Update),
                deleting: ops.is_in_flight(OperationKind::Delete),
                adding_member: ops.is_in_flight(OperationKind::AddMember),
                loading_members: ops.is_in_flight(OperationKind::LoadMembers),
            }
        };

        let screen = self.screen.lock().await;
        let members = match (&current, screen.members_of) {
            (Some(org), Some(of)) if org.id() == of => screen.members.clone(),
            _ => Vec::new(),
        };

        build_view(ViewInputs {
            context_loading,
            current,
            viewer: self.viewer.clone(),
            editing: screen.editing,
            create_open: screen.create_open,
            delete_open: screen.delete_open,
            add_member_open: screen.add_member_open,
            create_draft: screen.create_draft.clone(),
            edit_draft: screen.edit_draft.clone(),
            add_member_draft: screen.add_member_draft.clone(),
            validation_errors: screen.validation_errors.clone(),
            members,
            loading,
            notification,
        })
    }

    // ─── Forms and modals ─────────────────────────────────────────────────

    /// Open the create modal.
    pub async fn open_create(&self) {
        let mut screen = self.screen.lock().await;
        screen.create_open = true;
        screen.validation_errors = FieldErrors::new();
    }

    /// Close the create modal and discard its draft.
    pub async fn cancel_create(&self) {
        {
            let mut screen = self.screen.lock().await;
            screen.create_open = false;
            screen.create_draft = OrganizationDraft::default();
            screen.validation_errors = FieldErrors::new();
        }
        self.operations.lock().await.reset(OperationKind::Create);
    }

    /// Replace the create draft.
    pub async fn set_create_draft(&self, draft: OrganizationDraft) {
        self.screen.lock().await.create_draft = draft;
    }

    /// Enter edit mode with the draft prefilled from the current organization.
    pub async fn begin_edit(&self) -> WorkflowResult<()> {
        let current = self.require_current().await?;
        self.gate(Some(&current), OrganizationAction::EditOrganization)
            .await?;

        {
            let mut screen = self.screen.lock().await;
            screen.editing = true;
            screen.edit_draft = OrganizationDraft::from_organization(&current.organization);
            screen.validation_errors = FieldErrors::new();
        }
        self.notifications.lock().await.clear();
        Ok(())
    }

    /// Leave edit mode, restoring the draft from the current organization.
    pub async fn cancel_edit(&self) {
        let current = self.context.current().await;
        {
            let mut screen = self.screen.lock().await;
            screen.editing = false;
            screen.validation_errors = FieldErrors::new();
            screen.edit_draft = current
                .as_ref()
                .map(|c| OrganizationDraft::from_organization(&c.organization))
                .unwrap_or_default();
        }
        self.notifications.lock().await.clear();
        self.operations.lock().await.reset(OperationKind::Update);
    }

    /// Replace the edit draft.
    pub async fn set_edit_draft(&self, draft: OrganizationDraft) {
        self.screen.lock().await.edit_draft = draft;
    }

    /// Open the delete confirmation.
    pub async fn open_delete(&self) -> WorkflowResult<()> {
        let current = self.require_current().await?;
        self.gate(Some(&current), OrganizationAction::DeleteOrganization)
            .await?;
        let mut screen = self.screen.lock().await;
        screen.delete_open = true;
        screen.validation_errors = FieldErrors::new();
        Ok(())
    }

    /// Close the delete confirmation.
    pub async fn cancel_delete(&self) {
        self.screen.lock().await.delete_open = false;
        self.operations.lock().await.reset(OperationKind::Delete);
    }

    /// Open the add-member modal.
    pub async fn open_add_member(&self) -> WorkflowResult<()> {
        let current = self.require_current().await?;
        self.gate(Some(&current), OrganizationAction::AddMember)
            .await?;
        let mut screen = self.screen.lock().await;
        screen.add_member_open = true;
        screen.validation_errors = FieldErrors::new();
        Ok(())
    }

    /// Close the add-member modal and discard its draft.
    pub async fn cancel_add_member(&self) {
        {
            let mut screen = self.screen.lock().await;
            screen.add_member_open = false;
            screen.add_member_draft = AddMemberDraft::default();
            screen.validation_errors = FieldErrors::new();
        }
        self.operations.lock().await.reset(OperationKind::AddMember);
    }

    /// Replace the add-member draft.
    pub async fn set_add_member_draft(&self, draft: AddMemberDraft) {
        self.screen.lock().await.add_member_draft = draft;
    }

    /// Dismiss the success banner.
    pub async fn dismiss_success(&self) {
        self.notifications.lock().await.dismiss_success();
    }

    /// Dismiss the error banner.
    pub async fn dismiss_error(&self) {
        self.notifications.lock().await.dismiss_error();
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    /// Fetch the viewer's organization from the backend and make it current.
    ///
    /// This is the authoritative refetch: whatever the context held for that
    /// organization is overwritten.
    #[instrument(skip(self))]
    pub async fn load_user_organization(&self) -> WorkflowResult<Option<OrganizationSummary>> {
        match self.service.get_user_organization().await {
            Ok(summary) => {
                debug!(found = summary.is_some(), "Loaded user organization");
                self.context.reconcile(summary.clone()).await;
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, "Failed to load user organization");
                self.context.set_loading(false).await;
                let err = WorkflowError::from_service(&e, LOAD_ORGANIZATION_FAILED);
                self.notifications.lock().await.show_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Submit the create form.
    ///
    /// On success the modal closes, the draft is cleared and the created
    /// organization is current. On failure the modal and draft stay as they were.
    #[instrument(skip(self))]
    pub async fn create_organization(&self) -> WorkflowResult<OrganizationSummary> {
        self.gate(None, OrganizationAction::CreateOrganization)
            .await?;

        let draft = self.screen.lock().await.create_draft.clone();
        self.check(validate_organization(&draft)).await?;

        self.begin(OperationKind::Create).await?;

        let record = match self.service.create_organization(draft.to_create_data()).await {
            Ok(record) => record,
            Err(e) => return Err(self.fail(OperationKind::Create, &e, CREATE_FAILED).await),
        };

        let provisional = self.context.insert_with_derived_fields(record).await;
        info!(organization_id = %provisional.id(), "Organization created");

        // Phase 2: the provisional fields are guesses until the backend confirms them.
        let reloaded = self.load_user_organization().await;

        {
            let mut screen = self.screen.lock().await;
            screen.create_open = false;
            screen.create_draft = OrganizationDraft::default();
            screen.validation_errors = FieldErrors::new();
            screen.members.clear();
            screen.members_of = None;
        }

        match reloaded {
            Ok(authoritative) => {
                self.succeed(OperationKind::Create, CREATED).await;
                Ok(authoritative.unwrap_or(provisional))
            }
            Err(_) => {
                // The organization exists; the reload error stays in the banner.
                warn!(organization_id = %provisional.id(), "Organization created but reload failed");
                self.operations.lock().await.succeed(OperationKind::Create);
                Ok(provisional)
            }
        }
    }

    /// Save the edit form.
    ///
    /// Only name, email, address and phone are sent. The returned record
    /// replaces the cached one; avatar, role, plan and member count are kept.
    #[instrument(skip(self))]
    pub async fn save_edit(&self) -> WorkflowResult<OrganizationSummary> {
        let current = self.require_current().await?;
        self.gate(Some(&current), OrganizationAction::EditOrganization)
            .await?;

        let draft = self.screen.lock().await.edit_draft.clone();
        self.check(validate_organization(&draft)).await?;

        self.begin(OperationKind::Update).await?;

        let id = current.id();
        let updated = match self
            .service
            .update_organization(id, draft.to_update_data())
            .await
        {
            Ok(updated) => updated,
            Err(e) => return Err(self.fail(OperationKind::Update, &e, UPDATE_FAILED).await),
        };

        // Merge onto the freshest cached value, not the one read before the call.
        let prior = self
            .context
            .organizations()
            .await
            .into_iter()
            .find(|o| o.id() == id)
            .unwrap_or(current);
        let merged = prior.merge_update(updated);
        if !self.context.replace(merged.clone()).await {
            warn!(organization_id = %id, "Updated organization is no longer in context");
        }
        info!(organization_id = %id, "Organization updated");

        {
            let mut screen = self.screen.lock().await;
            screen.editing = false;
            screen.edit_draft = OrganizationDraft::from_organization(&merged.organization);
            screen.validation_errors = FieldErrors::new();
        }
        self.succeed(OperationKind::Update, UPDATED).await;

        Ok(merged)
    }

    /// Confirm deletion of the current organization. Owner only.
    #[instrument(skip(self))]
    pub async fn delete_organization(&self) -> WorkflowResult<()> {
        let current = self.require_current().await?;
        self.gate(Some(&current), OrganizationAction::DeleteOrganization)
            .await?;

        self.begin(OperationKind::Delete).await?;

        let id = current.id();
        if let Err(e) = self.service.delete_organization(id).await {
            return Err(self.fail(OperationKind::Delete, &e, DELETE_FAILED).await);
        }

        self.context.remove(id).await;
        info!(organization_id = %id, "Organization deleted");

        {
            let mut screen = self.screen.lock().await;
            screen.delete_open = false;
            screen.editing = false;
            screen.members.clear();
            screen.members_of = None;
        }
        self.succeed(OperationKind::Delete, DELETED).await;
        Ok(())
    }

    /// Submit the add-member form. Admin or owner only.
    ///
    /// Once the backend accepts the user, the roster is reloaded in full so it
    /// matches the backend rather than a local guess.
    #[instrument(skip(self))]
    pub async fn add_member(&self) -> WorkflowResult<AddUserResponse> {
        let current = self.require_current().await?;
        self.gate(Some(&current), OrganizationAction::AddMember)
            .await?;

        let draft = self.screen.lock().await.add_member_draft.clone();
        self.check(validate_add_member(&draft)).await?;

        self.begin(OperationKind::AddMember).await?;

        let id = current.id();
        let email = draft.email.trim();
        let response = match self.service.add_user_by_email(id, email).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(OperationKind::AddMember, &e, ADD_MEMBER_FAILED).await),
        };
        info!(organization_id = %id, email = %response.user.email, "Member added");

        {
            let mut screen = self.screen.lock().await;
            screen.add_member_open = false;
            screen.add_member_draft = AddMemberDraft::default();
            screen.validation_errors = FieldErrors::new();
        }
        self.succeed(
            OperationKind::AddMember,
            &format!(
                "Utilisateur {} ({}) ajouté avec succès !",
                response.user.name, response.user.email
            ),
        )
        .await;

        // Reload even over a refresh already in flight; the newest fetch wins.
        // A failed reload replaces the success banner with its own error.
        self.operations
            .lock()
            .await
            .restart(OperationKind::LoadMembers);
        if let Err(e) = self.load_members(id).await {
            warn!(organization_id = %id, error = %e, "Member added but roster reload failed");
        }

        Ok(response)
    }

    /// Reload the roster of the current organization.
    ///
    /// On failure the cached roster is left as it was. Returns the roster as
    /// cached once the fetch lands, which is a newer one if this fetch was
    /// overtaken.
    #[instrument(skip(self))]
    pub async fn refresh_members(&self) -> WorkflowResult<Vec<Member>> {
        let current = self.require_current().await?;
        self.gate(Some(&current), OrganizationAction::ViewMembers)
            .await?;

        self.begin(OperationKind::LoadMembers).await?;
        self.load_members(current.id()).await
    }

    /// Fetch the roster and cache it unless a later fetch already landed.
    ///
    /// Only the most recently started fetch settles the `LoadMembers` state
    /// and reports failures in the banner.
    async fn load_members(&self, id: Uuid) -> WorkflowResult<Vec<Member>> {
        let ticket = {
            let mut screen = self.screen.lock().await;
            screen.roster_requested += 1;
            screen.roster_requested
        };

        let result = self.service.get_organization_members(id).await;

        let (newest, result) = {
            let mut screen = self.screen.lock().await;
            let newest = ticket == screen.roster_requested;
            let result = result.map(|members| {
                if ticket > screen.roster_applied {
                    debug!(organization_id = %id, count = members.len(), "Loaded members");
                    screen.members = members;
                    screen.members_of = Some(id);
                    screen.roster_applied = ticket;
                } else {
                    debug!(organization_id = %id, "Discarding superseded roster");
                }
                screen.members.clone()
            });
            (newest, result)
        };

        match result {
            Ok(members) => {
                if newest {
                    self.operations
                        .lock()
                        .await
                        .succeed(OperationKind::LoadMembers);
                }
                Ok(members)
            }
            Err(e) if newest => Err(self
                .fail(OperationKind::LoadMembers, &e, LOAD_MEMBERS_FAILED)
                .await),
            Err(e) => {
                warn!(organization_id = %id, error = %e, "Superseded roster fetch failed");
                Err(WorkflowError::from_service(&e, LOAD_MEMBERS_FAILED))
            }
        }
    }

    // ─── Helpers ──────────────────────────────────────────────────────────

    async fn require_current(&self) -> WorkflowResult<OrganizationSummary> {
        self.context.current().await.ok_or_else(|| {
            debug!("No current organization");
            WorkflowError::NoCurrentOrganization
        })
    }

    /// Role gate. A refusal is shown in the error banner.
    async fn gate(
        &self,
        current: Option<&OrganizationSummary>,
        action: OrganizationAction,
    ) -> WorkflowResult<()> {
        if let Err(denied) = authorize(current.map(|c| c.role), action) {
            debug!(action = %action, "Action refused by role gate");
            self.notifications
                .lock()
                .await
                .show_error(denied.message.clone());
            return Err(denied.into());
        }
        Ok(())
    }

    /// Store field errors; fail when there are any.
    async fn check(&self, errors: FieldErrors) -> WorkflowResult<()> {
        let valid = errors.is_empty();
        self.screen.lock().await.validation_errors = errors.clone();
        if valid {
            Ok(())
        } else {
            Err(WorkflowError::Validation(errors))
        }
    }

    async fn begin(&self, kind: OperationKind) -> WorkflowResult<()> {
        self.operations.lock().await.begin(kind)?;
        self.notifications.lock().await.dismiss_error();
        Ok(())
    }

    async fn succeed(&self, kind: OperationKind, message: &str) {
        self.operations.lock().await.succeed(kind);
        self.notifications.lock().await.show_success(message);
    }

    async fn fail(&self, kind: OperationKind, err: &ServiceError, fallback: &str) -> WorkflowError {
        error!(operation = %kind, error = %err, "Organization operation failed");
        self.operations.lock().await.fail(kind);
        let classified = WorkflowError::from_service(err, fallback);
        self.notifications
            .lock()
            .await
            .show_error(classified.to_string());
        classified
    }
}
