// crates/gitlab-mock-config/src/config.rs
// ============================================================================
// Module: GitLab Mock Fixture Configuration
// Description: Fixture loading, validation, and server seeding.
// Purpose: Provide strict, fail-closed fixture parsing with hard limits.
// Dependencies: gitlab-mock-core, serde, time, toml
// ============================================================================

//! ## Overview
//! A fixture is a TOML file describing the users, groups, projects and
//! releases a simulated server starts with, plus the clock and audit sink it
//! runs under. Loading enforces size, encoding and path limits; validation
//! rejects duplicates and dangling references before anything is seeded.
//! Timestamps may be written as native TOML datetimes or quoted RFC 3339
//! strings; either form must carry an offset.
//!
//! ```toml
//! [clock]
//! mode = "fixed"
//! at = "2026-01-01T00:00:00Z"
//!
//! [[users]]
//! username = "root"
//! name = "Root"
//! email = "root@example.test"
//! is_admin = true
//!
//! [[projects]]
//! name = "Widgets"
//! path = "widgets"
//! namespace = { user = "root" }
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use gitlab_mock_core::AuditSink;
use gitlab_mock_core::Clock;
use gitlab_mock_core::FileAuditSink;
use gitlab_mock_core::GroupId;
use gitlab_mock_core::ManualClock;
use gitlab_mock_core::MockError;
use gitlab_mock_core::Namespace;
use gitlab_mock_core::NewGroup;
use gitlab_mock_core::NewProject;
use gitlab_mock_core::NewUser;
use gitlab_mock_core::NoopAuditSink;
use gitlab_mock_core::PermissionTier;
use gitlab_mock_core::ProjectRef;
use gitlab_mock_core::ReleaseDraft;
use gitlab_mock_core::Server;
use gitlab_mock_core::ServerState;
use gitlab_mock_core::StderrAuditSink;
use gitlab_mock_core::SystemClock;
use gitlab_mock_core::TagName;
use gitlab_mock_core::UserId;
use gitlab_mock_core::Visibility;
use serde::Deserialize;
use serde::Deserializer;
use serde::de;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use toml::Value;

// ============================================================================
// SECTION: Limits and Defaults
// ============================================================================

/// Environment variable naming the fixture file.
pub const CONFIG_ENV_VAR: &str = "GITLAB_MOCK_CONFIG";
/// Fixture file used when neither a path nor the env var is given.
pub const DEFAULT_CONFIG_NAME: &str = "gitlab-mock.toml";
/// Maximum fixture file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of users, groups or projects in one fixture.
pub(crate) const MAX_ENTITIES: usize = 4096;
/// Maximum number of releases per project.
pub(crate) const MAX_RELEASES_PER_PROJECT: usize = 1024;
/// Maximum length of a username, path or tag.
pub(crate) const MAX_IDENTIFIER_LENGTH: usize = 255;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Fixture describing the initial state of a simulated server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureConfig {
    /// Clock selection.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Users, seeded in order (ids start at 1).
    #[serde(default)]
    pub users: Vec<UserConfig>,
    /// Groups, seeded after users.
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    /// Projects, seeded after groups.
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

/// Clock the server reads "now" from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClockConfig {
    /// Wall clock.
    #[default]
    System,
    /// Clock pinned at a fixed instant.
    Fixed {
        /// Instant the clock reports.
        #[serde(deserialize_with = "deserialize_timestamp")]
        at: OffsetDateTime,
    },
}

/// Destination for operation audit events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "sink", rename_all = "snake_case")]
pub enum AuditConfig {
    /// Discard events.
    #[default]
    Noop,
    /// JSON lines on stderr.
    Stderr,
    /// Append-only JSON lines file.
    File {
        /// Output file path.
        path: PathBuf,
    },
}

/// Seeded user account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserConfig {
    /// Unique login name (case-insensitive).
    pub username: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Instance administrator flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Optional biography.
    #[serde(default)]
    pub bio: Option<String>,
}

/// Direct membership of a user at a tier.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberConfig {
    /// Username of the member.
    pub username: String,
    /// Granted tier.
    pub tier: PermissionTier,
}

/// Seeded group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupConfig {
    /// Unique group path (case-insensitive).
    pub path: String,
    /// Display name.
    pub name: String,
    /// Direct members.
    #[serde(default)]
    pub members: Vec<MemberConfig>,
}

/// Reference to the namespace that owns a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceConfig {
    /// Personal namespace, by username.
    User(String),
    /// Group namespace, by group path.
    Group(String),
}

/// Project shared with a group up to a maximum tier.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    /// Path of the receiving group.
    pub group: String,
    /// Cap applied to the group's members.
    pub tier: PermissionTier,
}

/// Seeded release.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseConfig {
    /// Tag name (unique per project, case-sensitive).
    pub tag_name: String,
    /// Username of the author.
    pub author: String,
    /// Release title.
    #[serde(default)]
    pub name: Option<String>,
    /// Source ref.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Publication instant; defaults to the seeding instant.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub released_at: Option<OffsetDateTime>,
}

/// Seeded project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Display name.
    pub name: String,
    /// Path segment within the namespace.
    pub path: String,
    /// Owning namespace.
    pub namespace: NamespaceConfig,
    /// Visibility level.
    #[serde(default)]
    pub visibility: Visibility,
    /// Direct members.
    #[serde(default)]
    pub members: Vec<MemberConfig>,
    /// Group shares.
    #[serde(default)]
    pub shares: Vec<ShareConfig>,
    /// Releases in creation order.
    #[serde(default)]
    pub releases: Vec<ReleaseConfig>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl FixtureConfig {
    /// Loads a fixture from `path`, the `GITLAB_MOCK_CONFIG` environment
    /// variable, or `gitlab-mock.toml`, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, exceeds limits,
    /// fails to parse, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Parses and validates a fixture from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl FixtureConfig {
    /// Validates the fixture for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on duplicate names, unknown
    /// references, empty identifiers, or exceeded limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_count("users", self.users.len(), MAX_ENTITIES)?;
        validate_count("groups", self.groups.len(), MAX_ENTITIES)?;
        validate_count("projects", self.projects.len(), MAX_ENTITIES)?;
        if let AuditConfig::File {
            path,
        } = &self.audit
        {
            validate_path_string("audit.path", &path.to_string_lossy())?;
        }

        let mut usernames = BTreeSet::new();
        for user in &self.users {
            validate_identifier("users.username", &user.username)?;
            if !usernames.insert(user.username.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate users.username: {}",
                    user.username
                )));
            }
        }

        let mut group_paths = BTreeSet::new();
        for group in &self.groups {
            validate_identifier("groups.path", &group.path)?;
            if !group_paths.insert(group.path.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!("duplicate groups.path: {}", group.path)));
            }
            validate_members("groups.members", &group.members, &usernames)?;
        }

        let mut project_paths = BTreeSet::new();
        for project in &self.projects {
            project.validate(&usernames, &group_paths, &mut project_paths)?;
        }
        Ok(())
    }
}

impl ProjectConfig {
    /// Validates one project against the known usernames and group paths.
    fn validate(
        &self,
        usernames: &BTreeSet<String>,
        group_paths: &BTreeSet<String>,
        project_paths: &mut BTreeSet<String>,
    ) -> Result<(), ConfigError> {
        validate_identifier("projects.path", &self.path)?;
        let namespace_path = match &self.namespace {
            NamespaceConfig::User(username) => {
                require_known("projects.namespace.user", username, usernames)?;
                username
            }
            NamespaceConfig::Group(path) => {
                require_known("projects.namespace.group", path, group_paths)?;
                path
            }
        };
        let full_path = format!("{namespace_path}/{}", self.path).to_ascii_lowercase();
        if !project_paths.insert(full_path) {
            return Err(ConfigError::Invalid(format!(
                "duplicate project: {namespace_path}/{}",
                self.path
            )));
        }
        validate_members("projects.members", &self.members, usernames)?;
        for share in &self.shares {
            require_known("projects.shares.group", &share.group, group_paths)?;
        }

        validate_count("projects.releases", self.releases.len(), MAX_RELEASES_PER_PROJECT)?;
        let mut tags = BTreeSet::new();
        for release in &self.releases {
            validate_identifier("projects.releases.tag_name", &release.tag_name)?;
            if !tags.insert(release.tag_name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate projects.releases.tag_name: {}",
                    release.tag_name
                )));
            }
            require_known("projects.releases.author", &release.author, usernames)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Seeding
// ============================================================================

impl FixtureConfig {
    /// Builds a server seeded with the fixture under its clock and audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened and
    /// [`ConfigError::Invalid`] when seeding is rejected by the store.
    pub fn build_server(&self) -> Result<Server, ConfigError> {
        self.validate()?;
        let clock = self.clock();
        let state = self.seed_state(clock.now())?;
        Ok(Server::builder().state(state).clock(clock).audit_sink(self.audit_sink()?).build())
    }

    /// Seeds a fresh entity graph, stamping every entity with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the store rejects an entity.
    pub fn seed_state(&self, now: OffsetDateTime) -> Result<ServerState, ConfigError> {
        let mut state = ServerState::default();
        let mut users = BTreeMap::new();
        for user in &self.users {
            let id = state.add_user(
                NewUser {
                    username: user.username.clone(),
                    name: user.name.clone(),
                    email: user.email.clone(),
                    is_admin: user.is_admin,
                    bio: user.bio.clone(),
                },
                now,
            )?;
            users.insert(user.username.to_ascii_lowercase(), id);
        }

        let mut groups = BTreeMap::new();
        for group in &self.groups {
            let id = state.add_group(
                NewGroup {
                    path: group.path.clone(),
                    name: group.name.clone(),
                },
                now,
            )?;
            for member in &group.members {
                state.add_group_member(id, lookup(&users, &member.username)?, member.tier)?;
            }
            groups.insert(group.path.to_ascii_lowercase(), id);
        }

        for project in &self.projects {
            project.seed(&mut state, &users, &groups, now)?;
        }
        Ok(state)
    }

    /// Returns the configured clock.
    fn clock(&self) -> Arc<dyn Clock> {
        match self.clock {
            ClockConfig::System => Arc::new(SystemClock) as Arc<dyn Clock>,
            ClockConfig::Fixed {
                at,
            } => Arc::new(ManualClock::new(at)),
        }
    }

    /// Opens the configured audit sink.
    fn audit_sink(&self) -> Result<Arc<dyn AuditSink>, ConfigError> {
        let sink: Arc<dyn AuditSink> = match &self.audit {
            AuditConfig::Noop => Arc::new(NoopAuditSink),
            AuditConfig::Stderr => Arc::new(StderrAuditSink),
            AuditConfig::File {
                path,
            } => {
                let file =
                    FileAuditSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Arc::new(file)
            }
        };
        Ok(sink)
    }
}

impl ProjectConfig {
    /// Seeds the project with its members, shares and releases.
    fn seed(
        &self,
        state: &mut ServerState,
        users: &BTreeMap<String, UserId>,
        groups: &BTreeMap<String, GroupId>,
        now: OffsetDateTime,
    ) -> Result<(), ConfigError> {
        let namespace = match &self.namespace {
            NamespaceConfig::User(username) => Namespace::User(lookup(users, username)?),
            NamespaceConfig::Group(path) => Namespace::Group(lookup(groups, path)?),
        };
        let id = state.add_project(
            NewProject {
                name: self.name.clone(),
                path: self.path.clone(),
                namespace,
                visibility: self.visibility,
            },
            now,
        )?;
        for member in &self.members {
            state.add_project_member(id, lookup(users, &member.username)?, member.tier)?;
        }
        for share in &self.shares {
            state.share_project(id, lookup(groups, &share.group)?, share.tier)?;
        }
        for release in &self.releases {
            let author = lookup(users, &release.author)?;
            state.find_project_mut(&ProjectRef::Id(id))?.releases_mut().add(
                ReleaseDraft {
                    tag_name: TagName::new(release.tag_name.clone()),
                    name: release.name.clone(),
                    git_ref: release.git_ref.clone(),
                    description: release.description.clone(),
                    released_at: release.released_at,
                },
                author,
                now,
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fixture loading and seeding errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading the fixture or opening the audit file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid fixture data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<MockError> for ConfigError {
    fn from(error: MockError) -> Self {
        Self::Invalid(error.to_string())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the fixture path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.to_string_lossy().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    validate_path(Path::new(trimmed))
        .map_err(|_| ConfigError::Invalid(format!("{field} exceeds path length limits")))
}

/// Rejects empty, padded, or oversized identifiers.
fn validate_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.trim() != value {
        return Err(ConfigError::Invalid(format!("{field} must be trimmed: {value}")));
    }
    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Rejects collections larger than `max`.
fn validate_count(field: &str, count: usize, max: usize) -> Result<(), ConfigError> {
    if count > max {
        return Err(ConfigError::Invalid(format!("{field} exceeds {max} entries")));
    }
    Ok(())
}

/// Rejects a reference to a name not in `known` (case-insensitive).
fn require_known(field: &str, value: &str, known: &BTreeSet<String>) -> Result<(), ConfigError> {
    if known.contains(&value.to_ascii_lowercase()) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("unknown {field}: {value}")))
    }
}

/// Validates member references and rejects a user listed twice.
fn validate_members(
    field: &str,
    members: &[MemberConfig],
    usernames: &BTreeSet<String>,
) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for member in members {
        require_known(field, &member.username, usernames)?;
        if !seen.insert(member.username.to_ascii_lowercase()) {
            return Err(ConfigError::Invalid(format!(
                "duplicate {field}: {}",
                member.username
            )));
        }
    }
    Ok(())
}

/// Resolves a seeded name to its id.
fn lookup<T: Copy>(ids: &BTreeMap<String, T>, name: &str) -> Result<T, ConfigError> {
    ids.get(&name.to_ascii_lowercase())
        .copied()
        .ok_or_else(|| ConfigError::Invalid(format!("unknown reference: {name}")))
}

/// Deserializes a timestamp given as a TOML datetime or an RFC 3339 string.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    timestamp_from_value(Value::deserialize(deserializer)?)
}

/// Optional form of [`deserialize_timestamp`].
fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)?.map(timestamp_from_value).transpose()
}

/// Converts a parsed TOML value into an offset timestamp.
fn timestamp_from_value<E>(value: Value) -> Result<OffsetDateTime, E>
where
    E: de::Error,
{
    let text = match value {
        Value::String(text) => text,
        Value::Datetime(datetime) => datetime.to_string(),
        other => {
            return Err(E::custom(format!("expected a timestamp, found {}", other.type_str())));
        }
    };
    OffsetDateTime::parse(&text, &Rfc3339)
        .map_err(|err| E::custom(format!("invalid RFC 3339 timestamp {text}: {err}")))
}
