// crates/gitlab-mock-core/tests/common/mod.rs
// ============================================================================
// Module: Test Fixtures
// Description: Shared seeded server for facade integration tests.
// Purpose: Build a small GitLab graph with one user per permission tier.
// Dependencies: gitlab-mock-core, time
// ============================================================================

//! ## Overview
//! The fixture seeds an `acme` group owning a private `acme/widgets` project
//! with an administrator, a group maintainer, a project contributor, a
//! read-only member, and an outsider. The clock is manual and starts at
//! [`START`].

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Shared helpers are used by a subset of test binaries and may panic on setup."
)]

use std::sync::Arc;

use gitlab_mock_core::GroupId;
use gitlab_mock_core::ManualClock;
use gitlab_mock_core::MemoryAuditSink;
use gitlab_mock_core::MockClient;
use gitlab_mock_core::Namespace;
use gitlab_mock_core::NewGroup;
use gitlab_mock_core::NewProject;
use gitlab_mock_core::NewUser;
use gitlab_mock_core::PermissionTier;
use gitlab_mock_core::ProjectId;
use gitlab_mock_core::ReleaseCreate;
use gitlab_mock_core::Server;
use gitlab_mock_core::ServerState;
use gitlab_mock_core::UserId;
use gitlab_mock_core::Visibility;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;

/// Instant the fixture clock starts at.
pub const START: OffsetDateTime = datetime!(2026-01-01 00:00 UTC);

/// Full path of the fixture project.
pub const PROJECT_PATH: &str = "acme/widgets";

/// Seeded server plus handles to its participants.
pub struct Fixture {
    /// Server under test.
    pub server: Server,
    /// Manual clock installed on the server.
    pub clock: Arc<ManualClock>,
    /// Audit buffer installed on the server.
    pub audit: Arc<MemoryAuditSink>,
    /// Instance administrator.
    pub admin: UserId,
    /// Maintainer of the `acme` group.
    pub maintainer: UserId,
    /// Direct `Contribute` member of the project.
    pub developer: UserId,
    /// Direct `View` member of the project.
    pub reporter: UserId,
    /// User with no relation to the project.
    pub outsider: UserId,
    /// The `acme` group.
    pub group: GroupId,
    /// The `acme/widgets` project.
    pub project: ProjectId,
}

impl Fixture {
    /// Returns a client acting as `user`.
    pub fn client(&self, user: UserId) -> MockClient {
        MockClient::new(self.server.clone(), user)
    }

    /// Moves the clock forward by whole seconds.
    pub fn tick(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }
}

/// Builds a user seed.
pub fn new_user(username: &str, is_admin: bool) -> NewUser {
    NewUser {
        username: username.to_string(),
        name: format!("{username} name"),
        email: format!("{username}@example.test"),
        is_admin,
        bio: None,
    }
}

/// Builds a release payload with only a tag.
pub fn release(tag: &str) -> ReleaseCreate {
    ReleaseCreate {
        tag_name: tag.into(),
        ..ReleaseCreate::default()
    }
}

/// Seeds the standard fixture.
pub fn fixture() -> Fixture {
    let mut state = ServerState::new();
    let admin = state.add_user(new_user("root", true), START).unwrap();
    let maintainer = state.add_user(new_user("maria", false), START).unwrap();
    let developer = state.add_user(new_user("dev", false), START).unwrap();
    let reporter = state.add_user(new_user("rita", false), START).unwrap();
    let outsider = state.add_user(new_user("olga", false), START).unwrap();
    let group = state
        .add_group(
            NewGroup {
                path: "acme".to_string(),
                name: "Acme".to_string(),
            },
            START,
        )
        .unwrap();
    state.add_group_member(group, maintainer, PermissionTier::Maintain).unwrap();
    let project = state
        .add_project(
            NewProject {
                name: "Widgets".to_string(),
                path: "widgets".to_string(),
                namespace: Namespace::Group(group),
                visibility: Visibility::Private,
            },
            START,
        )
        .unwrap();
    state.add_project_member(project, developer, PermissionTier::Contribute).unwrap();
    state.add_project_member(project, reporter, PermissionTier::View).unwrap();

    let clock = Arc::new(ManualClock::new(START));
    let audit = Arc::new(MemoryAuditSink::new());
    let server =
        Server::builder().state(state).clock(clock.clone()).audit_sink(audit.clone()).build();
    Fixture {
        server,
        clock,
        audit,
        admin,
        maintainer,
        developer,
        reporter,
        outsider,
        group,
        project,
    }
}
