//! # Orgdesk Organization Model
//!
//! This crate provides the client-side organization model for Orgdesk, the
//! multi-tenant CRM. It is shared by the service client, the role gate and the
//! management workflow.
//!
//! ## Overview
//!
//! The orgdesk-org crate handles:
//! - **Organizations**: Backend records and the viewer-specific summary kept in context
//! - **Members**: Roster entries returned by the organization API
//! - **Roles**: Viewer roles (`owner`, `admin`, `member`) with lenient parsing
//! - **Plans**: Subscription plans with display labels
//! - **Drafts**: Transient form state for create, edit and add-member
//! - **Validation**: Pure, synchronous field checks producing a field → error map
//! - **Context**: The shared, process-wide cache of the active organization
//!
//! ## Architecture
//!
//! ```text
//! OrganizationDraft ──validate──→ FieldErrors
//!        │
//!        └─ into CreateOrganizationData / UpdateOrganizationData ─→ backend
//!                                                                     │
//! OrganizationContext ←── OrganizationSummary (record + avatar/role/plan/member_count)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use orgdesk_org::{validate_organization, Field, OrganizationDraft};
//!
//! let draft = OrganizationDraft::new("Acme Inc", "contact@acme.com");
//! assert!(validate_organization(&draft).is_empty());
//!
//! let bad = OrganizationDraft::new("A", "not-an-email");
//! let errors = validate_organization(&bad);
//! assert!(errors.contains(Field::Name));
//! assert!(errors.contains(Field::Email));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod context;
pub mod draft;
pub mod membership;
pub mod organization;
pub mod plans;
pub mod roles;
pub mod validation;

// Re-export main types for convenience
pub use context::OrganizationContext;
pub use draft::{AddMemberDraft, CreateOrganizationData, OrganizationDraft, UpdateOrganizationData};
pub use membership::{AddUserResponse, AddedUser, Member, StoredUser};
pub use organization::{derive_avatar, Organization, OrganizationSummary};
pub use plans::{BadgeTone, Plan};
pub use roles::{role_tone, OrganizationRole, RoleTone};
pub use validation::{
    is_valid_email, validate_add_member, validate_organization, Field, FieldError, FieldErrors,
    ValidationRule,
};
