//! Per-operation progress tracking.
//!
//! Each kind of operation moves through `Idle → InFlight → Succeeded | Failed`
//! on its own, so an add-member request never blocks a save and vice versa.
//! Starting an operation that is already in flight is refused; this stands in
//! for the disabled submit control.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::{WorkflowError, WorkflowResult};

/// Kind of operation the management screen can run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Create an organization
    Create,
    /// Save the edit form
    Update,
    /// Delete the organization
    Delete,
    /// Add a member by email
    AddMember,
    /// Reload the member roster
    LoadMembers,
}

impl OperationKind {
    /// Get the string representation of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::AddMember => "add_member",
            OperationKind::LoadMembers => "load_members",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable state of one operation kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationState {
    /// Nothing happening
    Idle,
    /// Request sent, no answer yet
    InFlight,
    /// Last attempt succeeded
    Succeeded,
    /// Last attempt failed
    Failed,
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    InFlight,
    Succeeded { at: Instant },
    Failed,
}

/// Tracks the state of every operation kind.
#[derive(Debug)]
pub struct OperationTracker {
    entries: HashMap<OperationKind, Entry>,
    success_display: Duration,
}

impl OperationTracker {
    /// Creates a tracker whose successes read as idle after `success_display`.
    pub fn new(success_display: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            success_display,
        }
    }

    /// Current state of `kind`.
    pub fn state(&self, kind: OperationKind) -> OperationState {
        match self.entries.get(&kind) {
            None => OperationState::Idle,
            Some(Entry::InFlight) => OperationState::InFlight,
            Some(Entry::Failed) => OperationState::Failed,
            Some(Entry::Succeeded { at }) => {
                if at.elapsed() >= self.success_display {
                    OperationState::Idle
                } else {
                    OperationState::Succeeded
                }
            }
        }
    }

    /// Whether `kind` is waiting on the backend.
    pub fn is_in_flight(&self, kind: OperationKind) -> bool {
        matches!(self.entries.get(&kind), Some(Entry::InFlight))
    }

    /// Mark `kind` as in flight, refusing if it already is.
    pub fn begin(&mut self, kind: OperationKind) -> WorkflowResult<()> {
        if self.is_in_flight(kind) {
            return Err(WorkflowError::Busy(kind));
        }
        self.entries.insert(kind, Entry::InFlight);
        Ok(())
    }

    /// Mark `kind` as in flight even if it already is.
    ///
    /// The new run supersedes the pending one; the caller decides which
    /// result counts.
    pub fn restart(&mut self, kind: OperationKind) {
        self.entries.insert(kind, Entry::InFlight);
    }

    /// Record a success for `kind`.
    pub fn succeed(&mut self, kind: OperationKind) {
        self.entries.insert(kind, Entry::Succeeded { at: Instant::now() });
    }

    /// Record a failure for `kind`.
    pub fn fail(&mut self, kind: OperationKind) {
        self.entries.insert(kind, Entry::Failed);
    }

    /// Return `kind` to idle, e.g. when its form is closed.
    ///
    /// An in-flight operation is left alone; its result still has to land.
    pub fn reset(&mut self, kind: OperationKind) {
        if !self.is_in_flight(kind) {
            self.entries.remove(&kind);
        }
    }
}
