// crates/gitlab-mock-core/src/core/permission.rs
// ============================================================================
// Module: Permission Tiers
// Description: Ordered access levels and project visibility.
// Purpose: Provide the comparison vocabulary used by the permission evaluator.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`PermissionTier`] is totally ordered (`View < Contribute < Maintain <
//! Admin`); a requirement is met when the effective tier is greater than or
//! equal to it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Ordered permission tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTier {
    /// Read access (GitLab reporter).
    View,
    /// Write access to sub-resources (GitLab developer).
    Contribute,
    /// Membership and settings management (GitLab maintainer).
    Maintain,
    /// Full control including deletion (GitLab owner or instance admin).
    Admin,
}

impl PermissionTier {
    /// Returns the lowercase label for messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Contribute => "contribute",
            Self::Maintain => "maintain",
            Self::Admin => "admin",
        }
    }

    /// Returns true when this tier meets `required`.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Project visibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only members can see the project.
    #[default]
    Private,
    /// Any signed-in user can view the project.
    Internal,
    /// Anyone can view the project.
    Public,
}

impl Visibility {
    /// Returns true when non-members are granted [`PermissionTier::View`].
    #[must_use]
    pub const fn grants_view(self) -> bool {
        matches!(self, Self::Internal | Self::Public)
    }
}
