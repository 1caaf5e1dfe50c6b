// crates/gitlab-mock-core/src/core/clock.rs
// ============================================================================
// Module: GitLab Mock Clock
// Description: Injectable clocks for creation and release timestamps.
// Purpose: Let fixtures pin or advance time deterministically.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The store never reads wall-clock time directly. Every timestamp comes from
//! the [`Clock`] installed on the server, so fixtures can use a
//! [`ManualClock`] to produce stable orderings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use time::Duration;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Clock Trait
// ============================================================================

/// Source of "now" for the simulated server.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that returns a caller-controlled instant.
///
/// # Invariants
/// - Time only moves when [`ManualClock::set`] or [`ManualClock::advance`] is called.
#[derive(Debug)]
pub struct ManualClock {
    /// Current instant.
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    /// Creates a clock pinned at `start`.
    #[must_use]
    pub const fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: OffsetDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = instant;
        }
    }

    /// Advances the clock by `step`.
    pub fn advance(&self, step: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = guard.saturating_add(step);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.now.lock().map_or(OffsetDateTime::UNIX_EPOCH, |guard| *guard)
    }
}
