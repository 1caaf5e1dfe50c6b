// crates/gitlab-mock-core/src/runtime/permissions.rs
// ============================================================================
// Module: Permission Evaluator
// Description: Effective-tier computation for projects and groups.
// Purpose: Fail closed with Forbidden when the acting user is under-privileged.
// Dependencies: crate::core, crate::runtime::store
// ============================================================================

//! ## Overview
//! The effective tier of a user on a project is the maximum tier reachable
//! through any membership path:
//! - instance admin flag: [`PermissionTier::Admin`];
//! - owner of the project's personal namespace: [`PermissionTier::Admin`];
//! - direct project membership;
//! - membership of the group owning the project's namespace;
//! - membership of a group the project is shared with, capped at the share tier;
//! - [`PermissionTier::View`] on internal and public projects.
//!
//! Membership entries pointing at deleted users or groups are skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::GroupRef;
use crate::core::MockError;
use crate::core::PermissionTier;
use crate::core::UserId;
use crate::runtime::store::Group;
use crate::runtime::store::Namespace;
use crate::runtime::store::Project;
use crate::runtime::store::ServerState;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Computes the effective tier of `user` on `project`.
///
/// # Errors
///
/// Returns [`MockError::NotFound`] when the acting user does not exist.
pub fn effective_tier(
    state: &ServerState,
    user: UserId,
    project: &Project,
) -> Result<Option<PermissionTier>, MockError> {
    let actor = state.find_user(user)?;
    if actor.is_admin() {
        return Ok(Some(PermissionTier::Admin));
    }

    let mut tiers = Vec::new();
    match project.namespace() {
        Namespace::User(owner) if owner == user => tiers.push(PermissionTier::Admin),
        Namespace::User(_) => {}
        Namespace::Group(group) => {
            if let Ok(group) = state.find_group(&GroupRef::Id(group))
                && let Some(tier) = group.member_tier(user)
            {
                tiers.push(tier);
            }
        }
    }
    if let Some(tier) = project.member_tier(user) {
        tiers.push(tier);
    }
    for (group, cap) in project.shares() {
        if let Ok(group) = state.find_group(&GroupRef::Id(group))
            && let Some(tier) = group.member_tier(user)
        {
            tiers.push(tier.min(cap));
        }
    }
    if project.visibility().grants_view() {
        tiers.push(PermissionTier::View);
    }
    Ok(tiers.into_iter().max())
}

/// Requires `user` to hold at least `required` on `project`.
///
/// # Errors
///
/// Returns [`MockError::Forbidden`] when the effective tier is below
/// `required`, or [`MockError::NotFound`] when the acting user is missing.
pub fn check(
    state: &ServerState,
    user: UserId,
    project: &Project,
    required: PermissionTier,
) -> Result<(), MockError> {
    match effective_tier(state, user, project)? {
        Some(tier) if tier.satisfies(required) => Ok(()),
        _ => Err(MockError::forbidden(format!(
            "user {user} needs {required} access to project {}",
            project.path_with_namespace()
        ))),
    }
}

/// Computes the effective tier of `user` on `group`.
///
/// # Errors
///
/// Returns [`MockError::NotFound`] when the acting user does not exist.
pub fn effective_group_tier(
    state: &ServerState,
    user: UserId,
    group: &Group,
) -> Result<Option<PermissionTier>, MockError> {
    if state.find_user(user)?.is_admin() {
        return Ok(Some(PermissionTier::Admin));
    }
    Ok(group.member_tier(user))
}

/// Requires `user` to hold at least `required` in `group`.
///
/// # Errors
///
/// Returns [`MockError::Forbidden`] when the effective tier is below
/// `required`, or [`MockError::NotFound`] when the acting user is missing.
pub fn check_group(
    state: &ServerState,
    user: UserId,
    group: &Group,
    required: PermissionTier,
) -> Result<(), MockError> {
    match effective_group_tier(state, user, group)? {
        Some(tier) if tier.satisfies(required) => Ok(()),
        _ => Err(MockError::forbidden(format!(
            "user {user} needs {required} access to group {}",
            group.path()
        ))),
    }
}

/// Requires `user` to be an instance administrator.
///
/// # Errors
///
/// Returns [`MockError::Forbidden`] for non-admins, or
/// [`MockError::NotFound`] when the acting user is missing.
pub fn require_admin(state: &ServerState, user: UserId) -> Result<(), MockError> {
    if state.find_user(user)?.is_admin() {
        Ok(())
    } else {
        Err(MockError::forbidden(format!("user {user} is not an administrator")))
    }
}
