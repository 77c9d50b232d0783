//! Organization API HTTP client.
//!
//! REST implementation of [`OrganizationService`] on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use orgdesk_org::{
    AddUserResponse, CreateOrganizationData, Member, Organization, OrganizationSummary,
    UpdateOrganizationData,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::config::{ServiceConfig, ServiceEndpoint};
use crate::error::{ServiceError, ServiceResult};
use crate::service::OrganizationService;

/// Organization API client.
#[derive(Clone)]
pub struct OrganizationClient {
    /// HTTP client instance.
    client: Client,

    /// Service endpoint configuration.
    endpoint: ServiceEndpoint,
}

/// Body of the add-by-email request.
#[derive(Debug, Serialize)]
struct AddUserRequest<'a> {
    email: &'a str,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Member list, either bare or wrapped in `{"members": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MembersBody {
    Bare(Vec<Member>),
    Wrapped { members: Vec<Member> },
}

impl OrganizationClient {
    /// Create a new client for `endpoint`.
    pub fn new(endpoint: ServiceEndpoint, timeout: Duration) -> ServiceResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Create a client from the full service configuration.
    pub fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.api.clone(),
        })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.endpoint.api_token {
            Some(ref token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Turn a non-success response into a [`ServiceError`].
    ///
    /// `resource` names what a bare 404 refers to.
    async fn error_from(response: reqwest::Response, resource: Option<&str>) -> ServiceError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            error!("Organization API rejected the session token");
            return ServiceError::AuthenticationFailed;
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.message.or(parsed.error).unwrap_or_default(),
            Err(_) => body,
        };

        if status == StatusCode::NOT_FOUND && message.trim().is_empty() {
            if let Some(resource) = resource {
                return ServiceError::NotFound(resource.to_string());
            }
        }

        warn!("Organization API error ({}): {}", status.as_u16(), message);
        ServiceError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T>(
        response: reqwest::Response,
        resource: Option<&str>,
    ) -> ServiceResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !response.status().is_success() {
            return Err(Self::error_from(response, resource).await);
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl OrganizationService for OrganizationClient {
    #[instrument(skip(self, data), fields(name = %data.name))]
    async fn create_organization(
        &self,
        data: CreateOrganizationData,
    ) -> ServiceResult<Organization> {
        debug!("Creating organization");

        let url = self.endpoint.url("/api/organizations");
        let request = self.with_auth(self.client.post(&url).json(&data));
        let response = request.send().await?;
        Self::handle_response(response, None).await
    }

    #[instrument(skip(self, data), fields(organization_id = %id))]
    async fn update_organization(
        &self,
        id: Uuid,
        data: UpdateOrganizationData,
    ) -> ServiceResult<Organization> {
        debug!("Updating organization");

        let url = self.endpoint.url(&format!("/api/organizations/{}", id));
        let request = self.with_auth(self.client.put(&url).json(&data));
        let response = request.send().await?;
        Self::handle_response(response, Some(&id.to_string())).await
    }

    #[instrument(skip(self), fields(organization_id = %id))]
    async fn delete_organization(&self, id: Uuid) -> ServiceResult<()> {
        debug!("Deleting organization");

        let url = self.endpoint.url(&format!("/api/organizations/{}", id));
        let request = self.with_auth(self.client.delete(&url));
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response, Some(&id.to_string())).await);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(organization_id = %organization_id))]
    async fn add_user_by_email(
        &self,
        organization_id: Uuid,
        email: &str,
    ) -> ServiceResult<AddUserResponse> {
        debug!(email = %email, "Adding member");

        let url = self
            .endpoint
            .url(&format!("/api/organizations/{}/users", organization_id));
        let request = self.with_auth(self.client.post(&url).json(&AddUserRequest { email }));
        let response = request.send().await?;
        Self::handle_response(response, None).await
    }

    #[instrument(skip(self), fields(organization_id = %organization_id))]
    async fn get_organization_members(&self, organization_id: Uuid) -> ServiceResult<Vec<Member>> {
        debug!("Fetching members");

        let url = self
            .endpoint
            .url(&format!("/api/organizations/{}/members", organization_id));
        let request = self.with_auth(self.client.get(&url));
        let response = request.send().await?;

        let body: MembersBody =
            Self::handle_response(response, Some(&organization_id.to_string())).await?;
        Ok(match body {
            MembersBody::Bare(members) | MembersBody::Wrapped { members } => members,
        })
    }

    #[instrument(skip(self))]
    async fn get_user_organization(&self) -> ServiceResult<Option<OrganizationSummary>> {
        debug!("Fetching the signed-in user's organization");

        let url = self.endpoint.url("/api/organizations/me");
        let request = self.with_auth(self.client.get(&url));
        let response = request.send().await?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT
        ) {
            debug!("Signed-in user has no organization");
            return Ok(None);
        }

        Self::handle_response(response, None).await.map(Some)
    }
}
