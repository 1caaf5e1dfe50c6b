// crates/gitlab-mock-core/src/lib.rs
// ============================================================================
// Module: GitLab Mock Core Library
// Description: Public API surface for the in-memory GitLab test double.
// Purpose: Expose the entity store, scope guard, query engine, and facades.
// Dependencies: crate::{audit, clients, core, runtime}
// ============================================================================

//! ## Overview
//! GitLab mock core simulates a GitLab instance in memory so client code can
//! be tested without a network. A [`Server`] owns the entity graph; a
//! [`MockClient`] acts on it as one user through resource facades that
//! enforce permission tiers and reproduce API query semantics.
//!
//! ```no_run
//! use gitlab_mock_core::MockClient;
//! use gitlab_mock_core::ReleaseCreate;
//! use gitlab_mock_core::Server;
//! use gitlab_mock_core::UserId;
//!
//! let server = Server::new();
//! let client = MockClient::new(server, UserId::new(1));
//! let releases = client.releases("group/project")?;
//! releases.create(&ReleaseCreate {
//!     tag_name: "v1.0.0".into(),
//!     ..ReleaseCreate::default()
//! })?;
//! # Ok::<(), gitlab_mock_core::MockError>(())
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod clients;
pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::audit::AuditSink;
pub use self::audit::FileAuditSink;
pub use self::audit::MemoryAuditSink;
pub use self::audit::NoopAuditSink;
pub use self::audit::Operation;
pub use self::audit::OperationAuditEvent;
pub use self::audit::OperationOutcome;
pub use self::audit::ResourceKind;
pub use self::audit::StderrAuditSink;
pub use self::clients::ClientContext;
pub use self::clients::CollectionResponse;
pub use self::clients::GroupClient;
pub use self::clients::GroupCreate;
pub use self::clients::GroupInfo;
pub use self::clients::MockClient;
pub use self::clients::NamespaceInfo;
pub use self::clients::ProjectClient;
pub use self::clients::ProjectCreate;
pub use self::clients::ProjectInfo;
pub use self::clients::ReleaseClient;
pub use self::clients::ReleaseCreate;
pub use self::clients::ReleaseInfo;
pub use self::clients::ReleaseLinkClient;
pub use self::clients::ReleaseUpdate;
pub use self::clients::UserClient;
pub use self::clients::UserCreate;
pub use self::clients::UserInfo;
pub use self::clients::UserSummary;
pub use self::clients::UserUpdate;
pub use self::core::Clock;
pub use self::core::ErrorKind;
pub use self::core::GroupId;
pub use self::core::GroupRef;
pub use self::core::ManualClock;
pub use self::core::MockError;
pub use self::core::PermissionTier;
pub use self::core::ProjectId;
pub use self::core::ProjectRef;
pub use self::core::SystemClock;
pub use self::core::TagName;
pub use self::core::UserId;
pub use self::core::Visibility;
pub use self::runtime::DEFAULT_PER_PAGE;
pub use self::runtime::Group;
pub use self::runtime::Namespace;
pub use self::runtime::NewGroup;
pub use self::runtime::NewProject;
pub use self::runtime::NewUser;
pub use self::runtime::OperationScope;
pub use self::runtime::Pagination;
pub use self::runtime::Project;
pub use self::runtime::QueryPlan;
pub use self::runtime::Release;
pub use self::runtime::ReleaseCollection;
pub use self::runtime::ReleaseDraft;
pub use self::runtime::ReleaseOrderKey;
pub use self::runtime::ReleaseQuery;
pub use self::runtime::Server;
pub use self::runtime::ServerBuilder;
pub use self::runtime::ServerState;
pub use self::runtime::SortDirection;
pub use self::runtime::SortKey;
pub use self::runtime::User;
pub use self::runtime::UserOrderKey;
pub use self::runtime::UserQuery;
