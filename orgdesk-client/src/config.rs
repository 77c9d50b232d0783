//! Service configuration for the organization API client.
//!
//! Provides the endpoint, bearer token, timeout and TLS settings of the
//! organization API, plus the location of the locally cached signed-in user.
//! Configuration is loaded from environment variables with sensible defaults
//! for local development.

use std::path::PathBuf;
use std::time::Duration;

use orgdesk_org::StoredUser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration of the organization API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Organization API endpoint.
    pub api: ServiceEndpoint,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Whether to verify TLS certificates (disable only for testing).
    pub verify_tls: bool,

    /// JSON file holding the signed-in user cached by the authentication layer.
    pub session_file: Option<PathBuf>,
}

impl Default for ServiceConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            api: ServiceEndpoint {
                base_url: "http://localhost:3000".to_string(),
                api_token: None,
            },
            timeout_secs: 30,
            verify_tls: true,
            session_file: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ORGDESK_API_URL`: Organization API URL (default: http://localhost:3000)
    /// - `ORGDESK_API_TOKEN`: Bearer token of the signed-in session
    /// - `ORGDESK_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `ORGDESK_VERIFY_TLS`: Whether to verify TLS (default: true)
    /// - `ORGDESK_SESSION_FILE`: Path of the cached signed-in user
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            api: ServiceEndpoint {
                base_url: std::env::var("ORGDESK_API_URL").unwrap_or(default.api.base_url),
                api_token: std::env::var("ORGDESK_API_TOKEN").ok(),
            },
            timeout_secs: std::env::var("ORGDESK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            verify_tls: std::env::var("ORGDESK_VERIFY_TLS")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.verify_tls),
            session_file: std::env::var("ORGDESK_SESSION_FILE").ok().map(PathBuf::from),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate that all required configuration is present for production.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.api.api_token.is_none() {
            return Err(ConfigError::MissingEnvVar("ORGDESK_API_TOKEN".to_string()));
        }
        if !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "ORGDESK_API_URL".to_string(),
                message: "production endpoints must use https".to_string(),
            });
        }
        if !self.verify_tls {
            return Err(ConfigError::InvalidValue {
                key: "ORGDESK_VERIFY_TLS".to_string(),
                message: "TLS verification cannot be disabled in production".to_string(),
            });
        }
        Ok(())
    }

    /// Read the signed-in user cached by the authentication layer.
    ///
    /// Returns `Ok(None)` when no session file is configured or the file does not exist.
    pub fn stored_user(&self) -> Result<Option<StoredUser>, ConfigError> {
        let Some(path) = &self.session_file else {
            return Ok(None);
        };

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::InvalidValue {
                    key: "ORGDESK_SESSION_FILE".to_string(),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: "ORGDESK_SESSION_FILE".to_string(),
                message: e.to_string(),
            })
    }
}

/// Configuration for the organization API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Base URL for the service (e.g., "https://api.orgdesk.dev").
    pub base_url: String,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,
}

impl ServiceEndpoint {
    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Check if bearer authentication is available.
    pub fn has_auth(&self) -> bool {
        self.api_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.verify_tls);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_service_endpoint_url() {
        let endpoint = ServiceEndpoint {
            base_url: "https://api.example.com/".to_string(),
            api_token: None,
        };

        assert_eq!(
            endpoint.url("/api/organizations"),
            "https://api.example.com/api/organizations"
        );
        assert_eq!(
            endpoint.url("api/organizations/me"),
            "https://api.example.com/api/organizations/me"
        );
    }

    #[test]
    fn test_validate_for_production() {
        let mut config = ServiceConfig::default();
        assert!(matches!(
            config.validate_for_production(),
            Err(ConfigError::MissingEnvVar(_))
        ));

        config.api.api_token = Some("token".to_string());
        assert!(matches!(
            config.validate_for_production(),
            Err(ConfigError::InvalidValue { .. })
        ));

        config.api.base_url = "https://api.orgdesk.dev".to_string();
        assert!(config.validate_for_production().is_ok());
    }

    #[test]
    fn test_stored_user_without_file() {
        let config = ServiceConfig::default();
        assert!(config.stored_user().unwrap().is_none());

        let config = ServiceConfig {
            session_file: Some(std::env::temp_dir().join(format!("missing-{}.json", Uuid::now_v7()))),
            ..ServiceConfig::default()
        };
        assert!(config.stored_user().unwrap().is_none());
    }

    #[test]
    fn test_stored_user_from_file() {
        let path = std::env::temp_dir().join(format!("orgdesk-session-{}.json", Uuid::now_v7()));
        let user = StoredUser {
            id: Uuid::now_v7(),
            name: "Jeanne Martin".to_string(),
            email: "jeanne@acme.com".to_string(),
        };
        std::fs::write(&path, serde_json::to_string(&user).unwrap()).unwrap();

        let config = ServiceConfig {
            session_file: Some(path.clone()),
            ..ServiceConfig::default()
        };
        assert_eq!(config.stored_user().unwrap(), Some(user));

        std::fs::write(&path, "not json").unwrap();
        assert!(config.stored_user().is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
