// crates/gitlab-mock-core/src/core/identifiers.rs
// ============================================================================
// Module: GitLab Mock Identifiers
// Description: Strongly typed identifiers for simulated GitLab entities.
// Purpose: Keep numeric ids, paths, and tag names from being confused.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Numeric identifiers serialize as bare integers and tag names as strings,
//! mirroring the GitLab wire shapes. [`ProjectRef`] and [`GroupRef`] model the
//! "id or path" arguments accepted by the real API; both forms resolve against
//! the same entity space in the store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Numeric Identifiers
// ============================================================================

/// User identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a user identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(u64);

impl GroupId {
    /// Creates a group identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    /// Creates a project identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Tag Names
// ============================================================================

/// Release tag name, compared with case-sensitive ordinal equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    /// Creates a new tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TagName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TagName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Id-or-Path References
// ============================================================================

/// Project reference accepted by lookups: a numeric id or a full path.
///
/// # Invariants
/// - Strings made only of ASCII digits parse as [`ProjectRef::Id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectRef {
    /// Numeric project id.
    Id(ProjectId),
    /// Full namespace path such as `group/project`.
    Path(String),
}

impl ProjectRef {
    /// Parses an "id or path" argument.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        parse_numeric(value)
            .map_or_else(|| Self::Path(value.to_string()), |raw| Self::Id(ProjectId::new(raw)))
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => id.fmt(f),
            Self::Path(path) => path.fmt(f),
        }
    }
}

impl From<ProjectId> for ProjectRef {
    fn from(value: ProjectId) -> Self {
        Self::Id(value)
    }
}

impl From<&str> for ProjectRef {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for ProjectRef {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// Group reference accepted by lookups: a numeric id or a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupRef {
    /// Numeric group id.
    Id(GroupId),
    /// Group path.
    Path(String),
}

impl GroupRef {
    /// Parses an "id or path" argument.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        parse_numeric(value)
            .map_or_else(|| Self::Path(value.to_string()), |raw| Self::Id(GroupId::new(raw)))
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => id.fmt(f),
            Self::Path(path) => path.fmt(f),
        }
    }
}

impl From<GroupId> for GroupRef {
    fn from(value: GroupId) -> Self {
        Self::Id(value)
    }
}

impl From<&str> for GroupRef {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Parses an all-digit string into a raw id.
fn parse_numeric(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
