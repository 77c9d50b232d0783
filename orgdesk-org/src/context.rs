//! Shared organization context
//!
//! This module provides the process-wide cache of the organizations the viewer
//! belongs to and which one is current. It is an explicit object shared through
//! `Arc` and mutated only through the operations below, never as ambient state.
//!
//! The cache is a best-effort mirror of the backend. Writes happen after a
//! backend call resolves; the one exception is the provisional record written
//! right after a create, which the caller must follow with [`OrganizationContext::reconcile`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::organization::{Organization, OrganizationSummary};

#[derive(Debug)]
struct ContextState {
    organizations: Vec<OrganizationSummary>,
    current_id: Option<Uuid>,
    loading: bool,
    updated_at: DateTime<Utc>,
}

impl ContextState {
    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn upsert(&mut self, summary: OrganizationSummary) {
        match self
            .organizations
            .iter_mut()
            .find(|o| o.id() == summary.id())
        {
            Some(existing) => *existing = summary,
            None => self.organizations.push(summary),
        }
    }
}

/// Shared cache of the viewer's organizations.
///
/// At most one organization is current at a time.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use orgdesk_org::{Organization, OrganizationContext};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let context = OrganizationContext::shared();
/// let record = Organization::new(Uuid::now_v7(), "Acme Inc", "a@b.com");
///
/// let provisional = context.insert_with_derived_fields(record).await;
/// assert_eq!(context.current().await, Some(provisional));
/// # }
/// ```
#[derive(Debug)]
pub struct OrganizationContext {
    state: RwLock<ContextState>,
}

impl OrganizationContext {
    /// Creates an empty context that is still loading.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ContextState {
                organizations: Vec::new(),
                current_id: None,
                loading: true,
                updated_at: Utc::now(),
            }),
        }
    }

    /// Creates an empty context wrapped in an `Arc`, ready to be shared.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Creates a loaded context holding `summary` as the current organization.
    pub fn with_current(summary: OrganizationSummary) -> Self {
        Self {
            state: RwLock::new(ContextState {
                current_id: Some(summary.id()),
                organizations: vec![summary],
                loading: false,
                updated_at: Utc::now(),
            }),
        }
    }

    /// The current organization, if any.
    pub async fn current(&self) -> Option<OrganizationSummary> {
        let state = self.state.read().await;
        let id = state.current_id?;
        state.organizations.iter().find(|o| o.id() == id).cloned()
    }

    /// All organizations known to the context.
    pub async fn organizations(&self) -> Vec<OrganizationSummary> {
        self.state.read().await.organizations.clone()
    }

    /// Whether the context is still waiting for its first load.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Set the context-level loading flag.
    pub async fn set_loading(&self, loading: bool) {
        let mut state = self.state.write().await;
        state.loading = loading;
    }

    /// When the context was last mutated.
    pub async fn updated_at(&self) -> DateTime<Utc> {
        self.state.read().await.updated_at
    }

    /// Insert a freshly created organization with client-derived fields.
    ///
    /// The record becomes current, with the viewer as owner, the default plan,
    /// one member and initials as avatar. Returns the inserted summary.
    pub async fn insert_with_derived_fields(&self, organization: Organization) -> OrganizationSummary {
        let summary = OrganizationSummary::provisional(organization);
        let mut state = self.state.write().await;
        state.current_id = Some(summary.id());
        state.upsert(summary.clone());
        state.touch();
        debug!(organization_id = %summary.id(), "Inserted provisional organization");
        summary
    }

    /// Replace an organization already in the context.
    ///
    /// Returns `false` and changes nothing when no organization with the same ID exists.
    pub async fn replace(&self, summary: OrganizationSummary) -> bool {
        let mut state = self.state.write().await;
        let Some(existing) = state
            .organizations
            .iter_mut()
            .find(|o| o.id() == summary.id())
        else {
            return false;
        };
        *existing = summary;
        state.touch();
        true
    }

    /// Remove an organization.
    ///
    /// If it was current, the first remaining organization becomes current.
    pub async fn remove(&self, id: Uuid) -> Option<OrganizationSummary> {
        let mut state = self.state.write().await;
        let index = state.organizations.iter().position(|o| o.id() == id)?;
        let removed = state.organizations.remove(index);
        if state.current_id == Some(id) {
            let next = state.organizations.first().map(|o| o.id());
            state.current_id = next;
        }
        state.touch();
        debug!(organization_id = %id, "Removed organization from context");
        Some(removed)
    }

    /// Apply the authoritative result of reloading the viewer's organization.
    ///
    /// `Some` overwrites any cached value with the same ID (including a provisional one)
    /// and makes it current. `None` means the viewer has no organization and clears
    /// the current selection. Either way the context is no longer loading.
    pub async fn reconcile(&self, authoritative: Option<OrganizationSummary>) {
        let mut state = self.state.write().await;
        match authoritative {
            Some(summary) => {
                state.current_id = Some(summary.id());
                state.upsert(summary);
            }
            None => state.current_id = None,
        }
        state.loading = false;
        state.touch();
    }

    /// Drop every cached organization.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.organizations.clear();
        state.current_id = None;
        state.touch();
    }
}

impl Default for OrganizationContext {
    fn default() -> Self {
        Self::new()
    }
}
