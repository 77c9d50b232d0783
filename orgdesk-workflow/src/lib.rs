//! Organization management workflow for Orgdesk.
//!
//! This crate drives the organization management screen on top of the shared
//! [`OrganizationContext`](orgdesk_org::OrganizationContext) and an
//! [`OrganizationService`](orgdesk_client::OrganizationService):
//!
//! - **Manager**: create, edit, delete and add-member actions with validation,
//!   role gating and context reconciliation
//! - **Operations**: independent progress state per action kind
//! - **Notifications**: one success or error banner, successes expire on their own
//! - **View**: pure presentation model of the screen
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use orgdesk_client::{OrganizationClient, ServiceConfig};
//! use orgdesk_org::{OrganizationContext, OrganizationDraft};
//! use orgdesk_workflow::{ManagerConfig, OrganizationManager};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::from_env();
//! let client = Arc::new(OrganizationClient::from_config(&config)?);
//! let manager = OrganizationManager::new(client, OrganizationContext::shared(), ManagerConfig::from_env())
//!     .with_viewer(config.stored_user()?);
//!
//! manager.load_user_organization().await?;
//! manager.open_create().await;
//! manager.set_create_draft(OrganizationDraft::new("Acme Inc", "contact@acme.com")).await;
//! let created = manager.create_organization().await?;
//! println!("{}", created.name());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod notifications;
pub mod operations;
pub mod view;

pub use config::{ManagerConfig, DEFAULT_SUCCESS_DISPLAY};
pub use error::{WorkflowError, WorkflowResult};
pub use manager::OrganizationManager;
pub use notifications::{Notification, NotificationCenter, NotificationKind};
pub use operations::{OperationKind, OperationState, OperationTracker};
pub use view::{
    build_view, format_long_date, format_short_date, AddMemberModal, DeleteModal, FormModal,
    LoadingFlags, ManagementView, MemberRow, OrganizationPanel, Permissions, PlanBadge,
    RoleBadge, ViewInputs, WelcomePanel, DATE_UNAVAILABLE,
};
