// crates/gitlab-mock-core/src/core/error.rs
// ============================================================================
// Module: GitLab Mock Errors
// Description: Structured failure taxonomy shared by the store and facades.
// Purpose: Give callers a precise failure kind instead of an opaque error.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every failure raised by the simulation is a [`MockError`]. The store and
//! permission evaluator construct them directly; facades propagate them
//! unchanged with `?`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Failures raised by the simulated GitLab API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// Referenced entity or key is absent.
    #[error("not found: {0}")]
    NotFound(String),
    /// Acting user lacks the required permission tier.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Uniqueness violation.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Feature intentionally left unimplemented by the mock.
    #[error("not supported: {0}")]
    NotSupported(String),
    /// A panic occurred while another operation held the store.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),
    /// The calling thread already holds the operation scope.
    #[error("operation scope already held: {0}")]
    ReentrantScope(String),
    /// Request payload failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl MockError {
    /// Builds a [`MockError::NotFound`].
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    /// Builds a [`MockError::Forbidden`].
    #[must_use]
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden(detail.into())
    }

    /// Builds a [`MockError::Conflict`].
    #[must_use]
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }

    /// Builds a [`MockError::NotSupported`].
    #[must_use]
    pub fn not_supported(detail: impl Into<String>) -> Self {
        Self::NotSupported(detail.into())
    }

    /// Builds a [`MockError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    /// Returns the failure kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotSupported(_) => ErrorKind::NotSupported,
            Self::Poisoned(_) => ErrorKind::Poisoned,
            Self::ReentrantScope(_) => ErrorKind::ReentrantScope,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Stable failure classification, serialized as a snake_case label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`MockError::NotFound`].
    NotFound,
    /// See [`MockError::Forbidden`].
    Forbidden,
    /// See [`MockError::Conflict`].
    Conflict,
    /// See [`MockError::NotSupported`].
    NotSupported,
    /// See [`MockError::Poisoned`].
    Poisoned,
    /// See [`MockError::ReentrantScope`].
    ReentrantScope,
    /// See [`MockError::InvalidInput`].
    InvalidInput,
}

impl ErrorKind {
    /// Returns the label used in audit events.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::NotSupported => "not_supported",
            Self::Poisoned => "poisoned",
            Self::ReentrantScope => "reentrant_scope",
            Self::InvalidInput => "invalid_input",
        }
    }
}
