// crates/gitlab-mock-core/tests/permissions.rs
// ============================================================================
// Module: Permission Evaluator Tests
// Description: Effective tier computation across every grant path.
// Purpose: Validate tier ordering, inheritance, share caps, and admin bypass.
// Dependencies: gitlab-mock-core
// ============================================================================
//! ## Overview
//! Drives [`gitlab_mock_core::runtime::permissions`] directly against a
//! seeded graph so each grant path can be checked in isolation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use common::fixture;
use gitlab_mock_core::ErrorKind;
use gitlab_mock_core::GroupRef;
use gitlab_mock_core::PermissionTier;
use gitlab_mock_core::ProjectRef;
use gitlab_mock_core::UserId;
use gitlab_mock_core::runtime::permissions;

/// Verifies tiers are totally ordered from View to Admin.
#[test]
fn tiers_are_ordered() {
    assert!(PermissionTier::View < PermissionTier::Contribute);
    assert!(PermissionTier::Contribute < PermissionTier::Maintain);
    assert!(PermissionTier::Maintain < PermissionTier::Admin);
    assert!(PermissionTier::Admin.satisfies(PermissionTier::View));
    assert!(!PermissionTier::View.satisfies(PermissionTier::Contribute));
    assert_eq!(PermissionTier::Maintain.to_string(), "maintain");
}

/// Verifies each fixture participant lands on the expected tier.
#[test]
fn effective_tiers_follow_grant_paths() {
    let fx = fixture();
    let scope = fx.server.begin_operation_scope().unwrap();
    let project = scope.find_project(&ProjectRef::Id(fx.project)).unwrap();
    let tier = |user: UserId| permissions::effective_tier(&scope, user, project).unwrap();
    assert_eq!(tier(fx.admin), Some(PermissionTier::Admin));
    assert_eq!(tier(fx.maintainer), Some(PermissionTier::Maintain));
    assert_eq!(tier(fx.developer), Some(PermissionTier::Contribute));
    assert_eq!(tier(fx.reporter), Some(PermissionTier::View));
    assert_eq!(tier(fx.outsider), None);
}

/// Verifies check returns forbidden below the required tier.
#[test]
fn check_enforces_required_tier() {
    let fx = fixture();
    let scope = fx.server.begin_operation_scope().unwrap();
    let project = scope.find_project(&ProjectRef::Id(fx.project)).unwrap();
    permissions::check(&scope, fx.developer, project, PermissionTier::Contribute).unwrap();
    let err =
        permissions::check(&scope, fx.developer, project, PermissionTier::Maintain).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    let err = permissions::check(&scope, fx.outsider, project, PermissionTier::View).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

/// Verifies an unknown actor is not found rather than forbidden.
#[test]
fn unknown_actor_is_not_found() {
    let fx = fixture();
    let scope = fx.server.begin_operation_scope().unwrap();
    let project = scope.find_project(&ProjectRef::Id(fx.project)).unwrap();
    let err =
        permissions::check(&scope, UserId::new(77), project, PermissionTier::View).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        permissions::require_admin(&scope, UserId::new(77)).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

/// Verifies share grants are capped at the share tier.
#[test]
fn shared_group_tier_is_capped() {
    let fx = fixture();
    let mut scope = fx.server.begin_operation_scope().unwrap();
    let now = scope.now();
    let partners = scope
        .add_group(
            gitlab_mock_core::NewGroup {
                path: "partners".to_string(),
                name: "Partners".to_string(),
            },
            now,
        )
        .unwrap();
    scope.add_group_member(partners, fx.outsider, PermissionTier::Admin).unwrap();
    scope.share_project(fx.project, partners, PermissionTier::Contribute).unwrap();
    let project = scope.find_project(&ProjectRef::Id(fx.project)).unwrap();
    assert_eq!(
        permissions::effective_tier(&scope, fx.outsider, project).unwrap(),
        Some(PermissionTier::Contribute)
    );
}

/// Verifies group checks use direct membership with admin bypass.
#[test]
fn group_checks_use_membership() {
    let fx = fixture();
    let scope = fx.server.begin_operation_scope().unwrap();
    let group = scope.find_group(&GroupRef::Id(fx.group)).unwrap();
    assert_eq!(
        permissions::effective_group_tier(&scope, fx.maintainer, group).unwrap(),
        Some(PermissionTier::Maintain)
    );
    assert_eq!(
        permissions::effective_group_tier(&scope, fx.admin, group).unwrap(),
        Some(PermissionTier::Admin)
    );
    assert_eq!(permissions::effective_group_tier(&scope, fx.developer, group).unwrap(), None);
    permissions::check_group(&scope, fx.maintainer, group, PermissionTier::Maintain).unwrap();
    assert_eq!(
        permissions::check_group(&scope, fx.developer, group, PermissionTier::View)
            .unwrap_err()
            .kind(),
        ErrorKind::Forbidden
    );
    permissions::require_admin(&scope, fx.admin).unwrap();
    assert_eq!(
        permissions::require_admin(&scope, fx.maintainer).unwrap_err().kind(),
        ErrorKind::Forbidden
    );
}
