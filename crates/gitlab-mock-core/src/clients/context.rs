// crates/gitlab-mock-core/src/clients/context.rs
// ============================================================================
// Module: Client Context
// Description: Server handle bound to an acting user.
// Purpose: Run every facade call inside one scope and audit it afterwards.
// Dependencies: crate::audit, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! [`MockClient`] is the entry point callers hold. Facades share a
//! [`ClientContext`] whose [`ClientContext::run`] acquires exactly one
//! operation scope, runs the body, releases the scope, and then emits one
//! audit event. Sinks therefore never run under the store lock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::audit::Operation;
use crate::audit::OperationAuditEvent;
use crate::audit::OperationAuditEventParams;
use crate::clients::groups::GroupClient;
use crate::clients::projects::ProjectClient;
use crate::clients::releases::ReleaseClient;
use crate::clients::users::UserClient;
use crate::core::MockError;
use crate::core::PermissionTier;
use crate::core::ProjectRef;
use crate::core::UserId;
use crate::runtime::permissions;
use crate::runtime::scope::OperationScope;
use crate::runtime::scope::Server;
use crate::runtime::store::Project;
use crate::runtime::store::ServerState;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Server handle plus acting user shared by all facades.
#[derive(Clone)]
pub struct ClientContext {
    /// Simulated instance.
    server: Server,
    /// Identity every call is evaluated as.
    user: UserId,
}

impl ClientContext {
    /// Binds `server` to `user`.
    #[must_use]
    pub const fn new(server: Server, user: UserId) -> Self {
        Self {
            server,
            user,
        }
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the server handle.
    #[must_use]
    pub const fn server(&self) -> &Server {
        &self.server
    }

    /// Runs `body` inside one operation scope, then records an audit event.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Poisoned`] or [`MockError::ReentrantScope`] when
    /// the scope cannot be acquired, or whatever `body` returns.
    pub(crate) fn run<T>(
        &self,
        operation: Operation,
        target: Option<String>,
        body: impl FnOnce(&mut OperationScope<'_>) -> Result<T, MockError>,
    ) -> Result<T, MockError> {
        let result = match self.server.begin_operation_scope() {
            Ok(mut scope) => body(&mut scope),
            Err(err) => Err(err),
        };
        let event = OperationAuditEvent::new(
            OperationAuditEventParams {
                operation,
                target,
                actor_id: self.user,
                error: result.as_ref().err().map(MockError::kind),
            },
            self.server.now(),
        );
        self.server.audit().record(&event);
        result
    }
}

/// Resolves a project reference and requires `user` to hold `required` on it.
///
/// # Errors
///
/// Returns [`MockError::NotFound`] when the project or actor is missing and
/// [`MockError::Forbidden`] when the tier is insufficient.
pub(crate) fn authorized_project<'s>(
    state: &'s ServerState,
    project: &ProjectRef,
    user: UserId,
    required: PermissionTier,
) -> Result<&'s Project, MockError> {
    let found = state.find_project(project)?;
    permissions::check(state, user, found, required)?;
    Ok(found)
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Simulated GitLab client acting as one user.
///
/// # Invariants
/// - Every facade obtained from a client acts as the same user.
#[derive(Clone)]
pub struct MockClient {
    /// Shared facade context.
    context: ClientContext,
}

impl MockClient {
    /// Creates a client for `user` against `server`.
    #[must_use]
    pub const fn new(server: Server, user: UserId) -> Self {
        Self {
            context: ClientContext::new(server, user),
        }
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.context.user()
    }

    /// Returns the release facade for a project.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotFound`] when the project does not exist.
    pub fn releases(&self, project: impl Into<ProjectRef>) -> Result<ReleaseClient, MockError> {
        ReleaseClient::bind(self.context.clone(), &project.into())
    }

    /// Returns the user facade.
    #[must_use]
    pub fn users(&self) -> UserClient {
        UserClient::new(self.context.clone())
    }

    /// Returns the project facade.
    #[must_use]
    pub fn projects(&self) -> ProjectClient {
        ProjectClient::new(self.context.clone())
    }

    /// Returns the group facade.
    #[must_use]
    pub fn groups(&self) -> GroupClient {
        GroupClient::new(self.context.clone())
    }
}
