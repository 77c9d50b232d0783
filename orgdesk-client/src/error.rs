//! Error types for organization API calls.

use thiserror::Error;

/// Organization API errors.
///
/// The `Display` text of each variant is what the management screen shows in
/// its error banner, so backend messages are kept verbatim.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed before a response was received.
    #[error("Erreur réseau : {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Organization not found.
    #[error("Organisation introuvable : {0}")]
    NotFound(String),

    /// The session token was rejected.
    #[error("Session expirée, veuillez vous reconnecter")]
    AuthenticationFailed,

    /// Response body could not be decoded.
    #[error("Réponse invalide du serveur : {0}")]
    InvalidResponse(String),

    /// Any other failure, possibly without a message.
    #[error("{0}")]
    Other(String),
}

/// Result type for organization API calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Message to show the user, or `None` when the failure carries no usable text.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgdesk_client::ServiceError;
    ///
    /// let err = ServiceError::Api { status: 404, message: "Aucun compte pour cet email".into() };
    /// assert_eq!(err.user_message().as_deref(), Some("Aucun compte pour cet email"));
    ///
    /// assert!(ServiceError::Other(String::new()).user_message().is_none());
    /// ```
    pub fn user_message(&self) -> Option<String> {
        let message = self.to_string();
        let trimmed = message.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// HTTP status of the failure, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Api { status, .. } => Some(*status),
            ServiceError::NotFound(_) => Some(404),
            ServiceError::AuthenticationFailed => Some(401),
            ServiceError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            ServiceError::InvalidResponse(_) | ServiceError::Other(_) => None,
        }
    }
}
