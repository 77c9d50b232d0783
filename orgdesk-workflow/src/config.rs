//! Workflow configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time a success notification stays visible.
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_secs(4);

/// Settings of the organization management workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagerConfig {
    /// How long a success notification stays visible before it dismisses itself.
    pub success_display: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            success_display: DEFAULT_SUCCESS_DISPLAY,
        }
    }
}

impl ManagerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ORGDESK_SUCCESS_DISPLAY_MS`: success notification lifetime in milliseconds (default: 4000)
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            success_display: std::env::var("ORGDESK_SUCCESS_DISPLAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.success_display),
        }
    }
}
