//! The organization service contract.
//!
//! The management workflow depends on this trait rather than on the HTTP
//! client, so it can run against any backend that honours these calls.

use async_trait::async_trait;
use orgdesk_org::{
    AddUserResponse, CreateOrganizationData, Member, Organization, OrganizationSummary,
    UpdateOrganizationData,
};
use uuid::Uuid;

use crate::error::ServiceResult;

/// Calls the organization backend exposes to the management screen.
///
/// Every method either resolves with the backend's authoritative answer or
/// fails with a [`crate::ServiceError`]. Implementations must not retry.
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Create an organization owned by the signed-in user.
    async fn create_organization(&self, data: CreateOrganizationData)
        -> ServiceResult<Organization>;

    /// Update the editable fields of an organization. `None` fields are left out of the request.
    async fn update_organization(
        &self,
        id: Uuid,
        data: UpdateOrganizationData,
    ) -> ServiceResult<Organization>;

    /// Delete an organization.
    async fn delete_organization(&self, id: Uuid) -> ServiceResult<()>;

    /// Add an existing account to an organization by its email.
    async fn add_user_by_email(&self, organization_id: Uuid, email: &str)
        -> ServiceResult<AddUserResponse>;

    /// List the members of an organization.
    async fn get_organization_members(&self, organization_id: Uuid) -> ServiceResult<Vec<Member>>;

    /// Fetch the signed-in user's organization, or `None` if they have none.
    async fn get_user_organization(&self) -> ServiceResult<Option<OrganizationSummary>>;
}
