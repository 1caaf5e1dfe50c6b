// crates/gitlab-mock-config/src/lib.rs
// ============================================================================
// Module: GitLab Mock Config Library
// Description: Fixture model, validation, and server seeding.
// Purpose: Single source of truth for gitlab-mock.toml semantics.
// Dependencies: gitlab-mock-core, serde, toml
// ============================================================================

//! ## Overview
//! `gitlab-mock-config` turns a TOML fixture into a seeded
//! [`gitlab_mock_core::Server`]. Validation is strict and fail-closed: a
//! fixture with duplicate names or dangling references never reaches the
//! store.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuditConfig;
pub use config::CONFIG_ENV_VAR;
pub use config::ClockConfig;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::FixtureConfig;
pub use config::GroupConfig;
pub use config::MemberConfig;
pub use config::NamespaceConfig;
pub use config::ProjectConfig;
pub use config::ReleaseConfig;
pub use config::ShareConfig;
pub use config::UserConfig;
