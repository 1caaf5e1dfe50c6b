// crates/gitlab-mock-core/src/runtime/store.rs
// ============================================================================
// Module: GitLab Mock Entity Store
// Description: In-memory entity graph for users, groups, projects, releases.
// Purpose: Own every simulated entity and enforce referential invariants.
// Dependencies: crate::core, time
// ============================================================================

//! ## Overview
//! [`ServerState`] is the authoritative graph. Projects own their releases, so
//! removing a project drops its releases with it. Cross-entity links (release
//! authors, memberships, shares) are stored as ids and resolved lazily; a
//! dangling id surfaces as [`MockError::NotFound`] at lookup time.
//!
//! The state is only reachable through an
//! [`OperationScope`](crate::runtime::scope::OperationScope).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use time::OffsetDateTime;

use crate::core::GroupId;
use crate::core::GroupRef;
use crate::core::MockError;
use crate::core::PermissionTier;
use crate::core::ProjectId;
use crate::core::ProjectRef;
use crate::core::TagName;
use crate::core::UserId;
use crate::core::Visibility;

// ============================================================================
// SECTION: Users
// ============================================================================

/// Simulated user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User identifier.
    id: UserId,
    /// Unique login name.
    username: String,
    /// Display name.
    name: String,
    /// Email address.
    email: String,
    /// Instance administrator flag.
    is_admin: bool,
    /// Short biography.
    bio: Option<String>,
    /// Creation instant.
    created_at: OffsetDateTime,
}

impl User {
    /// Returns the user id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns true for instance administrators.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns the biography.
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Replaces the display name.
    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Replaces the email address.
    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }

    /// Replaces the admin flag.
    pub(crate) const fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
    }

    /// Replaces the biography.
    pub(crate) fn set_bio(&mut self, bio: String) {
        self.bio = Some(bio);
    }
}

/// Input for [`ServerState::add_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Instance administrator flag.
    pub is_admin: bool,
    /// Optional biography.
    pub bio: Option<String>,
}

// ============================================================================
// SECTION: Groups
// ============================================================================

/// Simulated group with direct members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group identifier.
    id: GroupId,
    /// Unique group path.
    path: String,
    /// Display name.
    name: String,
    /// Creation instant.
    created_at: OffsetDateTime,
    /// Direct members and their tiers.
    members: BTreeMap<UserId, PermissionTier>,
}

impl Group {
    /// Returns the group id.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the group path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns the tier granted to `user` by direct membership.
    #[must_use]
    pub fn member_tier(&self, user: UserId) -> Option<PermissionTier> {
        self.members.get(&user).copied()
    }

    /// Iterates direct members.
    pub fn members(&self) -> impl Iterator<Item = (UserId, PermissionTier)> + '_ {
        self.members.iter().map(|(user, tier)| (*user, *tier))
    }

    /// Adds or replaces a member entry.
    pub(crate) fn set_member(&mut self, user: UserId, tier: PermissionTier) {
        self.members.insert(user, tier);
    }
}

/// Input for [`ServerState::add_group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    /// Unique group path.
    pub path: String,
    /// Display name.
    pub name: String,
}

// ============================================================================
// SECTION: Projects
// ============================================================================

/// Owner of a project namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Personal namespace of a user.
    User(UserId),
    /// Group namespace.
    Group(GroupId),
}

/// Simulated project with its access-control list and sub-resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project identifier.
    id: ProjectId,
    /// Display name.
    name: String,
    /// Path segment within the namespace.
    path: String,
    /// Namespace owning the project.
    namespace: Namespace,
    /// Full `<namespace>/<path>` string.
    path_with_namespace: String,
    /// Visibility level.
    visibility: Visibility,
    /// Creation instant.
    created_at: OffsetDateTime,
    /// Direct members and their tiers.
    members: BTreeMap<UserId, PermissionTier>,
    /// Groups the project is shared with and the maximum tier of each share.
    shares: BTreeMap<GroupId, PermissionTier>,
    /// Owned releases.
    releases: ReleaseCollection,
}

impl Project {
    /// Returns the project id.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path segment.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the owning namespace.
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the full path.
    #[must_use]
    pub fn path_with_namespace(&self) -> &str {
        &self.path_with_namespace
    }

    /// Returns the visibility level.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns the tier granted to `user` by direct membership.
    #[must_use]
    pub fn member_tier(&self, user: UserId) -> Option<PermissionTier> {
        self.members.get(&user).copied()
    }

    /// Iterates group shares.
    pub fn shares(&self) -> impl Iterator<Item = (GroupId, PermissionTier)> + '_ {
        self.shares.iter().map(|(group, tier)| (*group, *tier))
    }

    /// Returns the release collection.
    #[must_use]
    pub const fn releases(&self) -> &ReleaseCollection {
        &self.releases
    }

    /// Returns the release collection for mutation.
    pub const fn releases_mut(&mut self) -> &mut ReleaseCollection {
        &mut self.releases
    }

    /// Adds or replaces a direct member entry.
    pub(crate) fn set_member(&mut self, user: UserId, tier: PermissionTier) {
        self.members.insert(user, tier);
    }

    /// Adds or replaces a group share.
    pub(crate) fn share_with(&mut self, group: GroupId, tier: PermissionTier) {
        self.shares.insert(group, tier);
    }
}

/// Input for [`ServerState::add_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Display name.
    pub name: String,
    /// Path segment within the namespace.
    pub path: String,
    /// Namespace owning the project.
    pub namespace: Namespace,
    /// Visibility level.
    pub visibility: Visibility,
}

// ============================================================================
// SECTION: Releases
// ============================================================================

/// Release attached to a single project.
///
/// # Invariants
/// - `created_at` is fixed at creation.
/// - `tag_name` is unique within the owning [`ReleaseCollection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Tag the release points at.
    tag_name: TagName,
    /// Release title.
    name: Option<String>,
    /// Branch or commit the tag was created from.
    git_ref: Option<String>,
    /// Markdown description.
    description: Option<String>,
    /// Creation instant.
    created_at: OffsetDateTime,
    /// Publication instant.
    released_at: OffsetDateTime,
    /// Weak reference to the author.
    author: UserId,
}

impl Release {
    /// Returns the tag name.
    #[must_use]
    pub const fn tag_name(&self) -> &TagName {
        &self.tag_name
    }

    /// Returns the release title.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the source ref.
    #[must_use]
    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns the publication instant.
    #[must_use]
    pub const fn released_at(&self) -> OffsetDateTime {
        self.released_at
    }

    /// Returns the author id.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Replaces the title.
    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Replaces the description.
    pub(crate) fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    /// Replaces the publication instant.
    pub(crate) const fn set_released_at(&mut self, released_at: OffsetDateTime) {
        self.released_at = released_at;
    }
}

/// Input for [`ReleaseCollection::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDraft {
    /// Tag name (unique per project).
    pub tag_name: TagName,
    /// Release title.
    pub name: Option<String>,
    /// Source ref.
    pub git_ref: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Publication instant; defaults to the creation instant.
    pub released_at: Option<OffsetDateTime>,
}

/// Insertion-ordered releases of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseCollection {
    /// Releases in creation order.
    items: Vec<Release>,
}

impl ReleaseCollection {
    /// Creates a release.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Conflict`] when the tag already exists.
    pub fn add(
        &mut self,
        draft: ReleaseDraft,
        author: UserId,
        now: OffsetDateTime,
    ) -> Result<&Release, MockError> {
        if self.get_by_tag_name(draft.tag_name.as_str()).is_some() {
            return Err(MockError::conflict(format!(
                "release with tag {} already exists",
                draft.tag_name
            )));
        }
        let index = self.items.len();
        self.items.push(Release {
            tag_name: draft.tag_name,
            name: draft.name,
            git_ref: draft.git_ref,
            description: draft.description,
            created_at: now,
            released_at: draft.released_at.unwrap_or(now),
            author,
        });
        Ok(&self.items[index])
    }

    /// Returns the release with `tag_name` (case-sensitive).
    #[must_use]
    pub fn get_by_tag_name(&self, tag_name: &str) -> Option<&Release> {
        self.items.iter().find(|release| release.tag_name.as_str() == tag_name)
    }

    /// Returns the release with `tag_name` for mutation.
    pub(crate) fn get_by_tag_name_mut(&mut self, tag_name: &str) -> Option<&mut Release> {
        self.items.iter_mut().find(|release| release.tag_name.as_str() == tag_name)
    }

    /// Detaches the release with `tag_name`; absent tags are a no-op.
    pub fn remove(&mut self, tag_name: &str) -> Option<Release> {
        let index = self.items.iter().position(|release| release.tag_name.as_str() == tag_name)?;
        Some(self.items.remove(index))
    }

    /// Iterates releases in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.items.iter()
    }

    /// Returns the number of releases.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the project has no releases.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReleaseCollection {
    type IntoIter = std::slice::Iter<'a, Release>;
    type Item = &'a Release;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Root of the simulated entity graph.
///
/// # Invariants
/// - Ids are allocated monotonically and never reused.
/// - Usernames, group paths, and project full paths are unique
///   (ASCII case-insensitive).
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Users keyed by id.
    users: BTreeMap<UserId, User>,
    /// Groups keyed by id.
    groups: BTreeMap<GroupId, Group>,
    /// Projects keyed by id.
    projects: BTreeMap<ProjectId, Project>,
    /// Next user id to allocate.
    next_user_id: u64,
    /// Next group id to allocate.
    next_group_id: u64,
    /// Next project id to allocate.
    next_project_id: u64,
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// Creates an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            groups: BTreeMap::new(),
            projects: BTreeMap::new(),
            next_user_id: 1,
            next_group_id: 1,
            next_project_id: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Conflict`] when the username is taken.
    pub fn add_user(&mut self, user: NewUser, now: OffsetDateTime) -> Result<UserId, MockError> {
        if self.user_by_username(&user.username).is_some() {
            return Err(MockError::conflict(format!("username {} is taken", user.username)));
        }
        let id = UserId::new(self.next_user_id);
        self.next_user_id += 1;
        self.users.insert(
            id,
            User {
                id,
                username: user.username,
                name: user.name,
                email: user.email,
                is_admin: user.is_admin,
                bio: user.bio,
                created_at: now,
            },
        );
        Ok(id)
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the user does not exist.
    pub fn find_user(&self, id: UserId) -> Result<&User, MockError> {
        self.users.get(&id).ok_or_else(|| MockError::not_found(format!("user {id}")))
    }

    /// Looks up a user by id for mutation.
    pub(crate) fn find_user_mut(&mut self, id: UserId) -> Result<&mut User, MockError> {
        self.users.get_mut(&id).ok_or_else(|| MockError::not_found(format!("user {id}")))
    }

    /// Looks up a user by username.
    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username.eq_ignore_ascii_case(username))
    }

    /// Iterates users in id order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Removes a user; references held elsewhere are left dangling.
    pub fn remove_user(&mut self, id: UserId) -> Option<User> {
        self.users.remove(&id)
    }

    // ------------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------------

    /// Registers a group.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Conflict`] when the path is taken.
    pub fn add_group(
        &mut self,
        group: NewGroup,
        now: OffsetDateTime,
    ) -> Result<GroupId, MockError> {
        if self.groups.values().any(|existing| existing.path.eq_ignore_ascii_case(&group.path)) {
            return Err(MockError::conflict(format!("group path {} is taken", group.path)));
        }
        let id = GroupId::new(self.next_group_id);
        self.next_group_id += 1;
        self.groups.insert(
            id,
            Group {
                id,
                path: group.path,
                name: group.name,
                created_at: now,
                members: BTreeMap::new(),
            },
        );
        Ok(id)
    }

    /// Looks up a group by id or path.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when no group matches.
    pub fn find_group(&self, group: &GroupRef) -> Result<&Group, MockError> {
        let found = match group {
            GroupRef::Id(id) => self.groups.get(id),
            GroupRef::Path(path) => {
                self.groups.values().find(|candidate| candidate.path.eq_ignore_ascii_case(path))
            }
        };
        found.ok_or_else(|| MockError::not_found(format!("group {group}")))
    }

    /// Grants `user` a direct tier in a group.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the group or user is missing.
    pub fn add_group_member(
        &mut self,
        group: GroupId,
        user: UserId,
        tier: PermissionTier,
    ) -> Result<(), MockError> {
        self.find_user(user)?;
        self.groups
            .get_mut(&group)
            .ok_or_else(|| MockError::not_found(format!("group {group}")))?
            .set_member(user, tier);
        Ok(())
    }

    /// Iterates groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    // ------------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------------

    /// Registers a project under an existing namespace.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the namespace owner is missing and
    /// [`MockError::Conflict`] when the full path is taken.
    pub fn add_project(
        &mut self,
        project: NewProject,
        now: OffsetDateTime,
    ) -> Result<ProjectId, MockError> {
        let namespace_path = self.namespace_path(project.namespace)?;
        let path_with_namespace = format!("{namespace_path}/{}", project.path);
        if self
            .projects
            .values()
            .any(|existing| existing.path_with_namespace.eq_ignore_ascii_case(&path_with_namespace))
        {
            let detail = format!("project {path_with_namespace} already exists");
            return Err(MockError::conflict(detail));
        }
        let id = ProjectId::new(self.next_project_id);
        self.next_project_id += 1;
        self.projects.insert(
            id,
            Project {
                id,
                name: project.name,
                path: project.path,
                namespace: project.namespace,
                path_with_namespace,
                visibility: project.visibility,
                created_at: now,
                members: BTreeMap::new(),
                shares: BTreeMap::new(),
                releases: ReleaseCollection::default(),
            },
        );
        Ok(id)
    }

    /// Looks up a project by id or full path.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when no project matches.
    pub fn find_project(&self, project: &ProjectRef) -> Result<&Project, MockError> {
        let found = match project {
            ProjectRef::Id(id) => self.projects.get(id),
            ProjectRef::Path(path) => self
                .projects
                .values()
                .find(|candidate| candidate.path_with_namespace.eq_ignore_ascii_case(path)),
        };
        found.ok_or_else(|| MockError::not_found(format!("project {project}")))
    }

    /// Looks up a project by id or full path for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when no project matches.
    pub fn find_project_mut(
        &mut self,
        project: &ProjectRef,
    ) -> Result<&mut Project, MockError> {
        let id = self.find_project(project)?.id;
        self.projects.get_mut(&id).ok_or_else(|| MockError::not_found(format!("project {project}")))
    }

    /// Iterates projects in id order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    /// Removes a project together with its releases.
    pub fn remove_project(&mut self, id: ProjectId) -> Option<Project> {
        self.projects.remove(&id)
    }

    /// Grants `user` a direct tier on a project.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project or user is missing.
    pub fn add_project_member(
        &mut self,
        project: ProjectId,
        user: UserId,
        tier: PermissionTier,
    ) -> Result<(), MockError> {
        self.find_user(user)?;
        self.find_project_mut(&ProjectRef::Id(project))?.set_member(user, tier);
        Ok(())
    }

    /// Shares a project with a group, capping members at `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project or group is missing.
    pub fn share_project(
        &mut self,
        project: ProjectId,
        group: GroupId,
        tier: PermissionTier,
    ) -> Result<(), MockError> {
        self.find_group(&GroupRef::Id(group))?;
        self.find_project_mut(&ProjectRef::Id(project))?.share_with(group, tier);
        Ok(())
    }

    /// Resolves the path of a namespace owner.
    fn namespace_path(&self, namespace: Namespace) -> Result<String, MockError> {
        match namespace {
            Namespace::User(user) => Ok(self.find_user(user)?.username.clone()),
            Namespace::Group(group) => Ok(self.find_group(&GroupRef::Id(group))?.path.clone()),
        }
    }
}
