// crates/gitlab-mock-core/src/clients/groups.rs
// ============================================================================
// Module: Group Facade
// Description: Group lookups, creation, and membership.
// Purpose: Simulate the GitLab groups API over the entity store.
// Dependencies: crate::clients, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! Group access is direct membership only; administrators hold `Admin` in
//! every group. The creator of a group becomes its first `Admin` member.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::audit::Operation;
use crate::clients::context::ClientContext;
use crate::clients::models::GroupCreate;
use crate::clients::models::GroupInfo;
use crate::core::GroupId;
use crate::core::GroupRef;
use crate::core::MockError;
use crate::core::PermissionTier;
use crate::core::UserId;
use crate::runtime::permissions;
use crate::runtime::store::NewGroup;

// ============================================================================
// SECTION: Group Client
// ============================================================================

/// Group facade.
#[derive(Clone)]
pub struct GroupClient {
    /// Server and acting user.
    context: ClientContext,
}

impl GroupClient {
    /// Wraps a client context.
    #[must_use]
    pub(crate) const fn new(context: ClientContext) -> Self {
        Self {
            context,
        }
    }

    /// Reads a group.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the group does not exist and
    /// [`MockError::Forbidden`] for non-members.
    pub fn get(&self, group: impl Into<GroupRef>) -> Result<GroupInfo, MockError> {
        let group = group.into();
        let actor = self.context.user();
        self.context.run(Operation::GroupGet, Some(group.to_string()), |scope| {
            let state = &**scope;
            let found = state.find_group(&group)?;
            permissions::check_group(state, actor, found, PermissionTier::View)?;
            Ok(GroupInfo::from(found))
        })
    }

    /// Creates a group owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the acting user does not exist and
    /// [`MockError::Conflict`] when the path is taken.
    pub fn create(&self, data: &GroupCreate) -> Result<GroupInfo, MockError> {
        let actor = self.context.user();
        self.context.run(Operation::GroupCreate, Some(data.path.clone()), |scope| {
            scope.atomically(|state, now| {
                state.find_user(actor)?;
                let id = state.add_group(
                    NewGroup {
                        path: data.path.clone(),
                        name: data.name.clone(),
                    },
                    now,
                )?;
                state.add_group_member(id, actor, PermissionTier::Admin)?;
                Ok(GroupInfo::from(state.find_group(&GroupRef::Id(id))?))
            })
        })
    }

    /// Grants a user a direct tier in a group.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `Maintain` in the group and
    /// [`MockError::NotFound`] when the group or member is missing.
    pub fn add_member(
        &self,
        group: impl Into<GroupRef>,
        member: UserId,
        tier: PermissionTier,
    ) -> Result<(), MockError> {
        let group = group.into();
        let actor = self.context.user();
        self.context.run(Operation::GroupAddMember, Some(group.to_string()), |scope| {
            scope.atomically(|state, _now| {
                let id: GroupId = {
                    let found = state.find_group(&group)?;
                    permissions::check_group(state, actor, found, PermissionTier::Maintain)?;
                    found.id()
                };
                state.add_group_member(id, member, tier)
            })
        })
    }
}
