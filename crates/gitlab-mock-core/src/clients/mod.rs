// crates/gitlab-mock-core/src/clients/mod.rs
// ============================================================================
// Module: GitLab Mock Clients
// Description: Resource facades bound to an acting user.
// Purpose: Expose GitLab-shaped CRUD over the simulated instance.
// Dependencies: crate::runtime, crate::audit
// ============================================================================

//! ## Overview
//! Start from [`MockClient`] and obtain per-resource facades from it. Every
//! facade method runs inside exactly one operation scope and records one
//! audit event.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod context;
pub mod groups;
pub mod models;
pub mod projects;
pub mod releases;
pub mod users;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::ClientContext;
pub use context::MockClient;
pub use groups::GroupClient;
pub use models::CollectionResponse;
pub use models::GroupCreate;
pub use models::GroupInfo;
pub use models::NamespaceInfo;
pub use models::ProjectCreate;
pub use models::ProjectInfo;
pub use models::ReleaseCreate;
pub use models::ReleaseInfo;
pub use models::ReleaseUpdate;
pub use models::UserCreate;
pub use models::UserInfo;
pub use models::UserSummary;
pub use models::UserUpdate;
pub use projects::ProjectClient;
pub use releases::ReleaseClient;
pub use releases::ReleaseLinkClient;
pub use users::UserClient;
