// crates/gitlab-mock-core/src/clients/releases.rs
// ============================================================================
// Module: Release Facade
// Description: Release CRUD and queries for one project.
// Purpose: Translate release API calls into scoped, permission-checked store access.
// Dependencies: crate::clients, crate::core, crate::runtime, tokio
// ============================================================================

//! ## Overview
//! A [`ReleaseClient`] is pinned to the numeric id of the project it was bound
//! to. Reads require `View`; create, update, and delete require `Contribute`.
//! Each release moves `Absent -> Created -> Updated* -> Removed`; re-creating
//! a removed tag yields a fresh release with a new `created_at`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::audit::Operation;
use crate::clients::context::ClientContext;
use crate::clients::context::authorized_project;
use crate::clients::models::CollectionResponse;
use crate::clients::models::ReleaseCreate;
use crate::clients::models::ReleaseInfo;
use crate::clients::models::ReleaseUpdate;
use crate::core::MockError;
use crate::core::PermissionTier;
use crate::core::ProjectId;
use crate::core::ProjectRef;
use crate::runtime::query;
use crate::runtime::query::QueryPlan;
use crate::runtime::query::ReleaseQuery;

// ============================================================================
// SECTION: Release Client
// ============================================================================

/// Release facade bound to one project.
#[derive(Clone)]
pub struct ReleaseClient {
    /// Server and acting user.
    context: ClientContext,
    /// Project resolved at bind time.
    project_id: ProjectId,
}

impl ReleaseClient {
    /// Resolves `project` and pins its id.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project does not exist.
    pub(crate) fn bind(context: ClientContext, project: &ProjectRef) -> Result<Self, MockError> {
        let project_id = context.run(Operation::ReleaseBind, Some(project.to_string()), |scope| {
            Ok(scope.find_project(project)?.id())
        })?;
        Ok(Self {
            context,
            project_id,
        })
    }

    /// Returns the bound project id.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the bound project as a reference.
    const fn project_ref(&self) -> ProjectRef {
        ProjectRef::Id(self.project_id)
    }

    /// Formats an audit target for the bound project and an optional tag.
    fn target(&self, tag: Option<&str>) -> Option<String> {
        Some(match tag {
            Some(tag) => format!("{}:{tag}", self.project_id),
            None => self.project_id.to_string(),
        })
    }

    /// Lists every release in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project is gone and
    /// [`MockError::Forbidden`] without `View` access.
    pub fn all(&self) -> Result<Vec<ReleaseInfo>, MockError> {
        let user = self.context.user();
        self.context.run(Operation::ReleaseList, self.target(None), |scope| {
            let state = &**scope;
            let project =
                authorized_project(state, &self.project_ref(), user, PermissionTier::View)?;
            Ok(project
                .releases()
                .iter()
                .map(|release| ReleaseInfo::project(release, state))
                .collect())
        })
    }

    /// Reads one release; `Ok(None)` when the tag does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project is gone and
    /// [`MockError::Forbidden`] without `View` access.
    pub fn get(&self, tag_name: &str) -> Result<Option<ReleaseInfo>, MockError> {
        let user = self.context.user();
        self.context.run(Operation::ReleaseGet, self.target(Some(tag_name)), |scope| {
            let state = &**scope;
            let project =
                authorized_project(state, &self.project_ref(), user, PermissionTier::View)?;
            Ok(project
                .releases()
                .get_by_tag_name(tag_name)
                .map(|release| ReleaseInfo::project(release, state)))
        })
    }

    /// Creates a release authored by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `Contribute` access and
    /// [`MockError::Conflict`] when the tag already exists.
    pub fn create(&self, data: &ReleaseCreate) -> Result<ReleaseInfo, MockError> {
        let user = self.context.user();
        let target = self.target(Some(data.tag_name.as_str()));
        self.context.run(Operation::ReleaseCreate, target, |scope| {
            scope.atomically(|state, now| {
                authorized_project(state, &self.project_ref(), user, PermissionTier::Contribute)?;
                let release = state
                    .find_project_mut(&self.project_ref())?
                    .releases_mut()
                    .add(data.to_draft(), user, now)?
                    .clone();
                Ok(ReleaseInfo::project(&release, state))
            })
        })
    }

    /// Applies the provided fields to an existing release.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `Contribute` access and
    /// [`MockError::NotFound`] when the tag does not exist.
    pub fn update(&self, data: &ReleaseUpdate) -> Result<ReleaseInfo, MockError> {
        let user = self.context.user();
        let tag_name = data.tag_name.as_str();
        self.context.run(Operation::ReleaseUpdate, self.target(Some(tag_name)), |scope| {
            scope.atomically(|state, _now| {
                authorized_project(state, &self.project_ref(), user, PermissionTier::Contribute)?;
                let release = state
                    .find_project_mut(&self.project_ref())?
                    .releases_mut()
                    .get_by_tag_name_mut(tag_name)
                    .ok_or_else(|| MockError::not_found(format!("release {tag_name}")))?;
                if let Some(name) = &data.name {
                    release.set_name(name.clone());
                }
                if let Some(description) = &data.description {
                    release.set_description(description.clone());
                }
                if let Some(released_at) = data.released_at {
                    release.set_released_at(released_at);
                }
                let release = release.clone();
                Ok(ReleaseInfo::project(&release, state))
            })
        })
    }

    /// Removes a release.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `Contribute` access and
    /// [`MockError::NotFound`] when the tag does not exist.
    pub fn delete(&self, tag_name: &str) -> Result<(), MockError> {
        let user = self.context.user();
        self.context.run(Operation::ReleaseDelete, self.target(Some(tag_name)), |scope| {
            scope.atomically(|state, _now| {
                authorized_project(state, &self.project_ref(), user, PermissionTier::Contribute)?;
                state
                    .find_project_mut(&self.project_ref())?
                    .releases_mut()
                    .remove(tag_name)
                    .map(|_| ())
                    .ok_or_else(|| MockError::not_found(format!("release {tag_name}")))
            })
        })
    }

    /// Lists releases through the query engine.
    ///
    /// Without a query the releases come back in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Forbidden`] without `View` access and
    /// [`MockError::NotSupported`] when HTML descriptions are requested.
    pub fn query(
        &self,
        release_query: Option<&ReleaseQuery>,
    ) -> Result<CollectionResponse<ReleaseInfo>, MockError> {
        let user = self.context.user();
        self.context.run(Operation::ReleaseQuery, self.target(None), |scope| {
            let state = &**scope;
            let project =
                authorized_project(state, &self.project_ref(), user, PermissionTier::View)?;
            let plan = match release_query {
                Some(release_query) => release_query.plan()?,
                None => QueryPlan::passthrough(),
            };
            let items = query::apply(project.releases(), &plan, |_| true)
                .into_iter()
                .map(|release| ReleaseInfo::project(release, state))
                .collect();
            Ok(CollectionResponse::new(items))
        })
    }

    /// Opens the asset link facade of a release.
    ///
    /// # Errors
    ///
    /// Always returns [`MockError::NotSupported`].
    pub fn release_links(&self, tag_name: &str) -> Result<ReleaseLinkClient, MockError> {
        self.context.run(Operation::ReleaseLinks, self.target(Some(tag_name)), |_scope| {
            Err(MockError::not_supported("release links"))
        })
    }

    // ------------------------------------------------------------------------
    // Async entry points
    // ------------------------------------------------------------------------

    /// Async form of [`Self::create`].
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub async fn create_async(&self, data: &ReleaseCreate) -> Result<ReleaseInfo, MockError> {
        tokio::task::yield_now().await;
        self.create(data)
    }

    /// Async form of [`Self::update`].
    ///
    /// # Errors
    ///
    /// See [`Self::update`].
    pub async fn update_async(&self, data: &ReleaseUpdate) -> Result<ReleaseInfo, MockError> {
        tokio::task::yield_now().await;
        self.update(data)
    }

    /// Async form of [`Self::delete`].
    ///
    /// # Errors
    ///
    /// See [`Self::delete`].
    pub async fn delete_async(&self, tag_name: &str) -> Result<(), MockError> {
        tokio::task::yield_now().await;
        self.delete(tag_name)
    }

    /// Async form of [`Self::query`].
    ///
    /// # Errors
    ///
    /// See [`Self::query`].
    pub async fn query_async(
        &self,
        release_query: Option<&ReleaseQuery>,
    ) -> Result<CollectionResponse<ReleaseInfo>, MockError> {
        tokio::task::yield_now().await;
        self.query(release_query)
    }
}

// ============================================================================
// SECTION: Release Links
// ============================================================================

/// Release asset link facade.
///
/// Links are not simulated, so no value of this type can be obtained.
#[derive(Debug)]
pub enum ReleaseLinkClient {}
