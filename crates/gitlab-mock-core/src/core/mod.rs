// crates/gitlab-mock-core/src/core/mod.rs
// ============================================================================
// Module: GitLab Mock Core Types
// Description: Identifiers, errors, permission tiers, and clocks.
// Purpose: Shared vocabulary for the store, evaluator, and facades.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Leaf types with no dependency on the entity graph.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod clock;
pub mod error;
pub mod identifiers;
pub mod permission;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use error::ErrorKind;
pub use error::MockError;
pub use identifiers::GroupId;
pub use identifiers::GroupRef;
pub use identifiers::ProjectId;
pub use identifiers::ProjectRef;
pub use identifiers::TagName;
pub use identifiers::UserId;
pub use permission::PermissionTier;
pub use permission::Visibility;
