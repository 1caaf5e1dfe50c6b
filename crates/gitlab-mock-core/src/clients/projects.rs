// crates/gitlab-mock-core/src/clients/projects.rs
// ============================================================================
// Module: Project Facade
// Description: Project lookups, provisioning, membership, and sharing.
// Purpose: Simulate the GitLab projects API over the entity store.
// Dependencies: crate::clients, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! Reads require `View`, membership and sharing require `Maintain`, and
//! deletion requires `Admin`. A project is created in the acting user's
//! personal namespace unless a group namespace is named, in which case the
//! actor must hold `Maintain` in that group.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::audit::Operation;
use crate::clients::context::ClientContext;
use crate::clients::context::authorized_project;
use crate::clients::models::ProjectCreate;
use crate::clients::models::ProjectInfo;
use crate::core::GroupRef;
use crate::core::MockError;
use crate::core::PermissionTier;
use crate::core::ProjectRef;
use crate::core::UserId;
use crate::runtime::permissions;
use crate::runtime::store::Namespace;
use crate::runtime::store::NewProject;

// ============================================================================
// SECTION: Project Client
// ============================================================================

/// Project facade.
#[derive(Clone)]
pub struct ProjectClient {
    /// Server and acting user.
    context: ClientContext,
}

impl ProjectClient {
    /// Wraps a client context.
    #[must_use]
    pub(crate) const fn new(context: ClientContext) -> Self {
        Self {
            context,
        }
    }

    /// Reads a project.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project does not exist and
    /// [`MockError::Forbidden`] without `View` access.
    pub fn get(&self, project: impl Into<ProjectRef>) -> Result<ProjectInfo, MockError> {
        let project = project.into();
        let actor = self.context.user();
        self.context.run(Operation::ProjectGet, Some(project.to_string()), |scope| {
            let found = authorized_project(scope, &project, actor, PermissionTier::View)?;
            Ok(ProjectInfo::from(found))
        })
    }

    /// Lists projects the acting user holds any tier on, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the acting user does not exist.
    pub fn visible(&self) -> Result<Vec<ProjectInfo>, MockError> {
        let actor = self.context.user();
        self.context.run(Operation::ProjectList, None, |scope| {
            let state = &**scope;
            let mut visible = Vec::new();
            for project in state.projects() {
                if permissions::effective_tier(state, actor, project)?.is_some() {
                    visible.push(ProjectInfo::from(project));
                }
            }
            Ok(visible)
        })
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `Maintain` in the target group,
    /// [`MockError::NotFound`] when the group is missing,
    /// [`MockError::Conflict`] when the full path is taken, and
    /// [`MockError::InvalidInput`] when the path resolves to blank.
    pub fn create(&self, data: &ProjectCreate) -> Result<ProjectInfo, MockError> {
        let actor = self.context.user();
        let path = data.effective_path();
        self.context.run(Operation::ProjectCreate, Some(path.clone()), |scope| {
            scope.atomically(|state, now| {
                if path.trim().is_empty() {
                    return Err(MockError::invalid_input("project path must be non-empty"));
                }
                let namespace = match data.namespace_id {
                    None => {
                        state.find_user(actor)?;
                        Namespace::User(actor)
                    }
                    Some(group_id) => {
                        let group = state.find_group(&GroupRef::Id(group_id))?;
                        permissions::check_group(state, actor, group, PermissionTier::Maintain)?;
                        Namespace::Group(group_id)
                    }
                };
                let id = state.add_project(
                    NewProject {
                        name: data.name.clone(),
                        path,
                        namespace,
                        visibility: data.visibility,
                    },
                    now,
                )?;
                Ok(ProjectInfo::from(state.find_project(&ProjectRef::Id(id))?))
            })
        })
    }

    /// Deletes a project and every release it owns.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project does not exist and
    /// [`MockError::Forbidden`] without `Admin` access.
    pub fn delete(&self, project: impl Into<ProjectRef>) -> Result<(), MockError> {
        let project = project.into();
        let actor = self.context.user();
        self.context.run(Operation::ProjectDelete, Some(project.to_string()), |scope| {
            scope.atomically(|state, _now| {
                let id = authorized_project(state, &project, actor, PermissionTier::Admin)?.id();
                state.remove_project(id);
                Ok(())
            })
        })
    }

    /// Grants a user a direct tier on a project.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `Maintain` access and
    /// [`MockError::NotFound`] when the project or member is missing.
    pub fn add_member(
        &self,
        project: impl Into<ProjectRef>,
        member: UserId,
        tier: PermissionTier,
    ) -> Result<(), MockError> {
        let project = project.into();
        let actor = self.context.user();
        self.context.run(Operation::ProjectAddMember, Some(project.to_string()), |scope| {
            scope.atomically(|state, _now| {
                let id =
                    authorized_project(state, &project, actor, PermissionTier::Maintain)?.id();
                state.add_project_member(id, member, tier)
            })
        })
    }

    /// Shares a project with a group, capping its members at `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `Maintain` access and
    /// [`MockError::NotFound`] when the project or group is missing.
    pub fn share_with_group(
        &self,
        project: impl Into<ProjectRef>,
        group: impl Into<GroupRef>,
        tier: PermissionTier,
    ) -> Result<(), MockError> {
        let project = project.into();
        let group = group.into();
        let actor = self.context.user();
        self.context.run(Operation::ProjectShare, Some(project.to_string()), |scope| {
            scope.atomically(|state, _now| {
                let id =
                    authorized_project(state, &project, actor, PermissionTier::Maintain)?.id();
                let group_id = state.find_group(&group)?.id();
                state.share_project(id, group_id, tier)
            })
        })
    }
}
