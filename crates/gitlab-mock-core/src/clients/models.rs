// crates/gitlab-mock-core/src/clients/models.rs
// ============================================================================
// Module: Facade Models
// Description: Request payloads and response projections for the facades.
// Purpose: Decouple caller-visible shapes from store entities.
// Dependencies: crate::core, crate::runtime::store, serde, time
// ============================================================================

//! ## Overview
//! Projections are owned snapshots built inside an operation scope; they hold
//! no references into the store. Field names follow the GitLab JSON API.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::GroupId;
use crate::core::ProjectId;
use crate::core::TagName;
use crate::core::UserId;
use crate::core::Visibility;
use crate::runtime::store::Group;
use crate::runtime::store::Namespace;
use crate::runtime::store::Project;
use crate::runtime::store::Release;
use crate::runtime::store::ReleaseDraft;
use crate::runtime::store::ServerState;
use crate::runtime::store::User;

// ============================================================================
// SECTION: Collections
// ============================================================================

/// Ordered collection returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CollectionResponse<T> {
    /// Items in response order.
    items: Vec<T>,
}

impl<T> CollectionResponse<T> {
    /// Wraps items in response order.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self {
            items,
        }
    }

    /// Returns the items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the response is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the response into its items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for CollectionResponse<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ============================================================================
// SECTION: Users
// ============================================================================

/// Compact user reference embedded in other projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// User id.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Display name.
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            name: user.name().to_string(),
        }
    }
}

/// Full user projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    /// User id.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Instance administrator flag.
    pub is_admin: bool,
    /// Biography.
    pub bio: Option<String>,
    /// Creation instant.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            is_admin: user.is_admin(),
            bio: user.bio().map(str::to_string),
            created_at: user.created_at(),
        }
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Instance administrator flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Biography.
    #[serde(default)]
    pub bio: Option<String>,
}

/// Partial update of a user; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
    /// New administrator flag.
    #[serde(default)]
    pub is_admin: Option<bool>,
    /// New biography.
    #[serde(default)]
    pub bio: Option<String>,
}

// ============================================================================
// SECTION: Releases
// ============================================================================

/// Release projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseInfo {
    /// Tag name.
    pub tag_name: TagName,
    /// Release title.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Source ref.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// Creation instant.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Publication instant.
    #[serde(with = "time::serde::rfc3339")]
    pub released_at: OffsetDateTime,
    /// Author id as recorded at creation.
    pub author_id: UserId,
    /// Author details; `None` once the author account has been deleted.
    pub author: Option<UserSummary>,
}

impl ReleaseInfo {
    /// Projects a release, resolving its author against `state`.
    #[must_use]
    pub fn project(release: &Release, state: &ServerState) -> Self {
        Self {
            tag_name: release.tag_name().clone(),
            name: release.name().map(str::to_string),
            description: release.description().map(str::to_string),
            git_ref: release.git_ref().map(str::to_string),
            created_at: release.created_at(),
            released_at: release.released_at(),
            author_id: release.author(),
            author: state.find_user(release.author()).ok().map(UserSummary::from),
        }
    }
}

/// Payload for creating a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCreate {
    /// Tag name (unique per project).
    pub tag_name: TagName,
    /// Release title.
    #[serde(default)]
    pub name: Option<String>,
    /// Source ref.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Publication instant; defaults to creation time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub released_at: Option<OffsetDateTime>,
}

impl ReleaseCreate {
    /// Converts the payload into a store draft.
    #[must_use]
    pub fn to_draft(&self) -> ReleaseDraft {
        ReleaseDraft {
            tag_name: self.tag_name.clone(),
            name: self.name.clone(),
            git_ref: self.git_ref.clone(),
            description: self.description.clone(),
            released_at: self.released_at,
        }
    }
}

/// Partial update of a release; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseUpdate {
    /// Tag of the release to update.
    pub tag_name: TagName,
    /// New title.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New publication instant.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub released_at: Option<OffsetDateTime>,
}

// ============================================================================
// SECTION: Projects
// ============================================================================

/// Namespace kind of a project projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NamespaceInfo {
    /// Personal namespace.
    User(UserId),
    /// Group namespace.
    Group(GroupId),
}

impl From<Namespace> for NamespaceInfo {
    fn from(namespace: Namespace) -> Self {
        match namespace {
            Namespace::User(user) => Self::User(user),
            Namespace::Group(group) => Self::Group(group),
        }
    }
}

/// Project projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    /// Project id.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Path segment.
    pub path: String,
    /// Full path.
    pub path_with_namespace: String,
    /// Owning namespace.
    pub namespace: NamespaceInfo,
    /// Visibility level.
    pub visibility: Visibility,
    /// Creation instant.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Project> for ProjectInfo {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_string(),
            path: project.path().to_string(),
            path_with_namespace: project.path_with_namespace().to_string(),
            namespace: project.namespace().into(),
            visibility: project.visibility(),
            created_at: project.created_at(),
        }
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreate {
    /// Display name.
    pub name: String,
    /// Path segment; derived from the name when absent.
    #[serde(default)]
    pub path: Option<String>,
    /// Group namespace; the acting user's namespace when absent.
    #[serde(default)]
    pub namespace_id: Option<GroupId>,
    /// Visibility level.
    #[serde(default)]
    pub visibility: Visibility,
}

impl ProjectCreate {
    /// Returns the explicit path or one derived from the name.
    #[must_use]
    pub fn effective_path(&self) -> String {
        self.path.clone().unwrap_or_else(|| {
            self.name
                .trim()
                .chars()
                .map(|ch| if ch.is_whitespace() { '-' } else { ch.to_ascii_lowercase() })
                .collect()
        })
    }
}

// ============================================================================
// SECTION: Groups
// ============================================================================

/// Group projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    /// Group id.
    pub id: GroupId,
    /// Group path.
    pub path: String,
    /// Display name.
    pub name: String,
    /// Creation instant.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Group> for GroupInfo {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id(),
            path: group.path().to_string(),
            name: group.name().to_string(),
            created_at: group.created_at(),
        }
    }
}

/// Payload for creating a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCreate {
    /// Unique group path.
    pub path: String,
    /// Display name.
    pub name: String,
}
