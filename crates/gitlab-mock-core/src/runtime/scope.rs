// crates/gitlab-mock-core/src/runtime/scope.rs
// ============================================================================
// Module: Operation Scope Guard
// Description: Server handle and RAII scope serializing store access.
// Purpose: Ensure no operation observes or leaves a half-mutated graph.
// Dependencies: crate::core, crate::runtime::store, crate::audit
// ============================================================================

//! ## Overview
//! [`Server`] is the explicit fixture handle: cloning it shares the same graph,
//! and the graph is dropped with the last clone. All access goes through
//! [`Server::begin_operation_scope`], which locks the whole store and returns an
//! [`OperationScope`] guard. The lock is released when the guard drops, on
//! every exit path.
//!
//! A logical operation acquires one scope and hands `&mut OperationScope` (or the
//! [`ServerState`] it dereferences to) to its helpers. The server records which
//! thread owns the scope; a second acquisition from that thread fails with
//! [`MockError::ReentrantScope`] instead of blocking on the mutex.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::Deref;
use std::ops::DerefMut;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::thread;
use std::thread::ThreadId;

use time::OffsetDateTime;

use crate::audit::AuditSink;
use crate::audit::NoopAuditSink;
use crate::core::Clock;
use crate::core::MockError;
use crate::core::SystemClock;
use crate::runtime::store::ServerState;

// ============================================================================
// SECTION: Server Handle
// ============================================================================

/// Shared internals behind a [`Server`] handle.
struct ServerInner {
    /// Entity graph guarded by the scope mutex.
    state: Mutex<ServerState>,
    /// Thread currently holding the scope.
    owner: Mutex<Option<ThreadId>>,
    /// Time source for created and released timestamps.
    clock: Arc<dyn Clock>,
    /// Destination for operation audit events.
    audit: Arc<dyn AuditSink>,
}

/// Handle to one simulated GitLab instance.
///
/// # Invariants
/// - Every clone observes the same [`ServerState`].
#[derive(Clone)]
pub struct Server {
    /// Shared internals.
    inner: Arc<ServerInner>,
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

impl Server {
    /// Creates an empty server with the system clock and no audit output.
    #[must_use]
    pub fn new() -> Self {
        ServerBuilder::new().build()
    }

    /// Returns a builder for a customised server.
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Acquires exclusive access to the store for one logical operation.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::ReentrantScope`] when the calling thread already
    /// holds a scope on this server and [`MockError::Poisoned`] when an
    /// earlier operation panicked while holding a scope.
    pub fn begin_operation_scope(&self) -> Result<OperationScope<'_>, MockError> {
        let current = thread::current().id();
        if self.inner.owner.lock().is_ok_and(|owner| *owner == Some(current)) {
            return Err(MockError::ReentrantScope(
                "calling thread already holds the operation scope".to_string(),
            ));
        }
        let guard = self
            .inner
            .state
            .lock()
            .map_err(|_| MockError::Poisoned("server state mutex poisoned".to_string()))?;
        if let Ok(mut owner) = self.inner.owner.lock() {
            *owner = Some(current);
        }
        Ok(OperationScope {
            guard,
            owner: &self.inner.owner,
            clock: self.inner.clock.as_ref(),
        })
    }

    /// Returns the current instant from the installed clock.
    #[must_use]
    pub fn now(&self) -> OffsetDateTime {
        self.inner.clock.now()
    }

    /// Returns the audit sink.
    #[must_use]
    pub fn audit(&self) -> &dyn AuditSink {
        self.inner.audit.as_ref()
    }
}

/// Builder for [`Server`].
pub struct ServerBuilder {
    /// Initial graph.
    state: ServerState,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Audit sink.
    audit: Arc<dyn AuditSink>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    /// Creates a builder with an empty graph, the system clock, and a no-op sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ServerState::new(),
            clock: Arc::new(SystemClock),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the initial graph.
    #[must_use]
    pub fn state(mut self, state: ServerState) -> Self {
        self.state = state;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server {
            inner: Arc::new(ServerInner {
                state: Mutex::new(self.state),
                owner: Mutex::new(None),
                clock: self.clock,
                audit: self.audit,
            }),
        }
    }
}

// ============================================================================
// SECTION: Operation Scope
// ============================================================================

/// Exclusive, serialized view of the store for one logical operation.
///
/// # Invariants
/// - At most one scope exists per server at any time.
/// - Dropping the scope clears the owner, then releases the store.
pub struct OperationScope<'a> {
    /// Held store lock.
    guard: MutexGuard<'a, ServerState>,
    /// Owner slot cleared on drop.
    owner: &'a Mutex<Option<ThreadId>>,
    /// Server clock.
    clock: &'a dyn Clock,
}

impl OperationScope<'_> {
    /// Returns the current instant from the server clock.
    #[must_use]
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Runs a mutation all-or-nothing.
    ///
    /// The graph is snapshotted before `mutation` runs and restored if it
    /// returns an error, so a failure partway leaves no trace.
    ///
    /// # Errors
    ///
    /// Returns whatever error `mutation` returns.
    pub fn atomically<T>(
        &mut self,
        mutation: impl FnOnce(&mut ServerState, OffsetDateTime) -> Result<T, MockError>,
    ) -> Result<T, MockError> {
        let now = self.clock.now();
        let snapshot = self.guard.clone();
        match mutation(&mut self.guard, now) {
            Ok(value) => Ok(value),
            Err(err) => {
                *self.guard = snapshot;
                Err(err)
            }
        }
    }
}

impl Drop for OperationScope<'_> {
    fn drop(&mut self) {
        if let Ok(mut owner) = self.owner.lock() {
            *owner = None;
        }
    }
}

impl Deref for OperationScope<'_> {
    type Target = ServerState;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for OperationScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}
