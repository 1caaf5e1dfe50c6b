// crates/gitlab-mock-core/src/runtime/mod.rs
// ============================================================================
// Module: GitLab Mock Runtime
// Description: Entity store, permission evaluator, scope guard, query engine.
// Purpose: Hold and serialize access to the simulated GitLab graph.
// Dependencies: crate::core, crate::audit
// ============================================================================

//! ## Overview
//! Runtime modules implement the simulation engine the facades compose. All
//! facade calls funnel through [`Server::begin_operation_scope`] so the graph
//! is only ever observed under the scope lock.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod permissions;
pub mod query;
pub mod scope;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use query::DEFAULT_PER_PAGE;
pub use query::Pagination;
pub use query::QueryPlan;
pub use query::ReleaseOrderKey;
pub use query::ReleaseQuery;
pub use query::SortDirection;
pub use query::SortKey;
pub use query::UserOrderKey;
pub use query::UserQuery;
pub use scope::OperationScope;
pub use scope::Server;
pub use scope::ServerBuilder;
pub use store::Group;
pub use store::Namespace;
pub use store::NewGroup;
pub use store::NewProject;
pub use store::NewUser;
pub use store::Project;
pub use store::Release;
pub use store::ReleaseCollection;
pub use store::ReleaseDraft;
pub use store::ServerState;
pub use store::User;
