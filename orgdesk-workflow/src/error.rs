//! Workflow error taxonomy.

use orgdesk_client::ServiceError;
use orgdesk_org::FieldErrors;
use orgdesk_rbac::PermissionDenied;
use thiserror::Error;

use crate::operations::OperationKind;

/// Why a workflow action did not complete.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// The draft failed validation; nothing was sent.
    #[error("Invalid form: {0}")]
    Validation(FieldErrors),

    /// The viewer's role does not allow the action; nothing was sent.
    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    /// The backend call failed with a message.
    #[error("{message}")]
    Service {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Message shown to the user.
        message: String,
    },

    /// The backend call failed without any usable message.
    #[error("{fallback}")]
    Unknown {
        /// Localized fallback shown to the user.
        fallback: String,
    },

    /// The action needs a current organization and there is none.
    #[error("No current organization")]
    NoCurrentOrganization,

    /// The same kind of operation is already in flight.
    #[error("{0} already in progress")]
    Busy(OperationKind),
}

/// Result type for workflow actions.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    /// Classify a backend failure, using `fallback` when it carries no message.
    pub fn from_service(err: &ServiceError, fallback: &str) -> Self {
        match err.user_message() {
            Some(message) => WorkflowError::Service {
                status: err.status(),
                message,
            },
            None => WorkflowError::Unknown {
                fallback: fallback.to_string(),
            },
        }
    }

    /// Whether the error was detected locally, without any network call.
    pub fn is_local(&self) -> bool {
        !matches!(self, WorkflowError::Service { .. } | WorkflowError::Unknown { .. })
    }

    /// Field errors, for validation failures.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            WorkflowError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
