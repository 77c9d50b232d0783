//! # Orgdesk Client
//!
//! This crate provides the boundary between Orgdesk and its organization API.
//!
//! ## Overview
//!
//! The orgdesk-client crate handles:
//! - **Service contract**: the [`OrganizationService`] trait the workflow depends on
//! - **HTTP client**: [`OrganizationClient`], the REST implementation of that trait
//! - **Configuration**: endpoint, token, timeout and TLS settings loaded from the environment
//! - **Errors**: [`ServiceError`], carrying the backend's message so it can be shown as-is
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `create_organization` | `POST /api/organizations` |
//! | `update_organization` | `PUT /api/organizations/{id}` |
//! | `delete_organization` | `DELETE /api/organizations/{id}` |
//! | `add_user_by_email` | `POST /api/organizations/{id}/users` |
//! | `get_organization_members` | `GET /api/organizations/{id}/members` |
//! | `get_user_organization` | `GET /api/organizations/me` |
//!
//! Failed calls are never retried; the caller decides what to show.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use orgdesk_client::{OrganizationClient, OrganizationService, ServiceConfig};
//! use orgdesk_org::CreateOrganizationData;
//!
//! async fn create() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OrganizationClient::from_config(&ServiceConfig::from_env())?;
//!     let org = client
//!         .create_organization(CreateOrganizationData {
//!             name: "Acme Inc".to_string(),
//!             email: "contact@acme.com".to_string(),
//!             address: None,
//!             phone: None,
//!         })
//!         .await?;
//!     println!("created {}", org.id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod service;

// Re-export main types
pub use config::{ConfigError, ServiceConfig, ServiceEndpoint};
pub use error::{ServiceError, ServiceResult};
pub use http::OrganizationClient;
pub use service::OrganizationService;
