// crates/gitlab-mock-core/src/audit.rs
// ============================================================================
// Module: GitLab Mock Audit Logging
// Description: Structured audit events for facade operations.
// Purpose: Emit one JSON event per simulated API call without hard dependencies.
// Dependencies: crate::core, serde, serde_json, time
// ============================================================================

//! ## Overview
//! Every facade call records an [`OperationAuditEvent`] after its operation
//! scope is released. Sinks decide where events go: stderr, an append-only
//! file, an in-memory buffer for assertions, or nowhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use time::OffsetDateTime;

use crate::core::ErrorKind;
use crate::core::UserId;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Resource kind touched by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Project releases.
    Release,
    /// Release asset links.
    ReleaseLink,
    /// User accounts.
    User,
    /// Projects.
    Project,
    /// Groups.
    Group,
}

/// Facade operation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Resolve the project a release client is bound to.
    ReleaseBind,
    /// List all releases.
    ReleaseList,
    /// Read one release by tag.
    ReleaseGet,
    /// Create a release.
    ReleaseCreate,
    /// Update a release.
    ReleaseUpdate,
    /// Delete a release.
    ReleaseDelete,
    /// Query releases with sort and pagination.
    ReleaseQuery,
    /// Open the release link client.
    ReleaseLinks,
    /// Read the acting user.
    UserCurrent,
    /// Read a user by id.
    UserGet,
    /// List all users.
    UserList,
    /// Query users.
    UserQuery,
    /// Create a user.
    UserCreate,
    /// Update a user.
    UserUpdate,
    /// Delete a user.
    UserDelete,
    /// Read a project.
    ProjectGet,
    /// List visible projects.
    ProjectList,
    /// Create a project.
    ProjectCreate,
    /// Delete a project.
    ProjectDelete,
    /// Add a project member.
    ProjectAddMember,
    /// Share a project with a group.
    ProjectShare,
    /// Read a group.
    GroupGet,
    /// Create a group.
    GroupCreate,
    /// Add a group member.
    GroupAddMember,
}

impl Operation {
    /// Returns the resource kind the operation targets.
    #[must_use]
    pub const fn resource(self) -> ResourceKind {
        match self {
            Self::ReleaseBind
            | Self::ReleaseList
            | Self::ReleaseGet
            | Self::ReleaseCreate
            | Self::ReleaseUpdate
            | Self::ReleaseDelete
            | Self::ReleaseQuery => ResourceKind::Release,
            Self::ReleaseLinks => ResourceKind::ReleaseLink,
            Self::UserCurrent
            | Self::UserGet
            | Self::UserList
            | Self::UserQuery
            | Self::UserCreate
            | Self::UserUpdate
            | Self::UserDelete => ResourceKind::User,
            Self::ProjectGet
            | Self::ProjectList
            | Self::ProjectCreate
            | Self::ProjectDelete
            | Self::ProjectAddMember
            | Self::ProjectShare => ResourceKind::Project,
            Self::GroupGet | Self::GroupCreate | Self::GroupAddMember => ResourceKind::Group,
        }
    }
}

/// Operation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOutcome {
    /// The operation completed.
    Success,
    /// The operation failed; see `error_kind`.
    Failure,
}

/// Audit event payload for one facade call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp from the server clock (milliseconds since epoch).
    pub timestamp_ms: i128,
    /// Operation label.
    pub operation: Operation,
    /// Resource kind.
    pub resource: ResourceKind,
    /// Target reference (project path, tag, user id) when known.
    pub target: Option<String>,
    /// Acting user.
    pub actor_id: UserId,
    /// Outcome classification.
    pub outcome: OperationOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
}

/// Inputs required to construct an operation audit event.
pub struct OperationAuditEventParams {
    /// Operation label.
    pub operation: Operation,
    /// Target reference when known.
    pub target: Option<String>,
    /// Acting user.
    pub actor_id: UserId,
    /// Failure kind, `None` on success.
    pub error: Option<ErrorKind>,
}

impl OperationAuditEvent {
    /// Creates an audit event stamped at `now`.
    #[must_use]
    pub fn new(params: OperationAuditEventParams, now: OffsetDateTime) -> Self {
        let outcome = if params.error.is_some() {
            OperationOutcome::Failure
        } else {
            OperationOutcome::Success
        };
        Self {
            event: "mock_operation",
            timestamp_ms: now.unix_timestamp_nanos() / 1_000_000,
            operation: params.operation,
            resource: params.operation.resource(),
            target: params.target,
            actor_id: params.actor_id,
            outcome,
            error_kind: params.error.map(ErrorKind::label),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for facade operation events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &OperationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &OperationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &OperationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that buffers events in memory for test assertions.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<OperationAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<OperationAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &OperationAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &OperationAuditEvent) {}
}
