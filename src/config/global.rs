//! Process-wide configuration state and the environment selector.
//!
//! The global [`Config`] is a single immutable value behind a lock:
//! [`configure`] swaps in a replacement atomically, [`current`] returns a
//! snapshot. Sessions resolve against the snapshot they took, so a
//! concurrent reconfigure never produces a partially-updated setup.
//!
//! The override selector comes from the `PAGEDRIVER_ENV` environment
//! variable, defaulting to `"default"` when unset. Resolution itself stays
//! pure: [`selector_or_default`] is a plain function over an optional value,
//! and [`drive_as`](crate::drive_as) bypasses the environment entirely.

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::Config;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable consulted for the override selector.
pub const SELECTOR_ENV: &str = "PAGEDRIVER_ENV";

/// Selector used when the environment variable is unset.
pub const DEFAULT_SELECTOR: &str = "default";

// ============================================================================
// Global State
// ============================================================================

/// The process-wide configuration, unset until [`configure`] is called.
static GLOBAL: RwLock<Option<Arc<Config>>> = RwLock::new(None);

/// Serializes tests that touch the process-wide state.
#[cfg(test)]
pub(crate) static GLOBAL_TEST_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

/// Replaces the process-wide configuration.
///
/// The swap is atomic from the caller's perspective: readers see either the
/// previous value or the new one, never a mix. Sessions already running keep
/// the setup they resolved at start.
pub fn configure(config: Config) {
    info!(
        overrides = config.overrides.len(),
        "Replacing global configuration"
    );
    *GLOBAL.write() = Some(Arc::new(config));
}

/// Removes the process-wide configuration.
///
/// Subsequent [`drive`](crate::drive) calls fail until [`configure`] runs
/// again.
pub fn deconfigure() {
    *GLOBAL.write() = None;
}

/// Returns a snapshot of the process-wide configuration, if set.
#[must_use]
pub fn current() -> Option<Arc<Config>> {
    GLOBAL.read().clone()
}

// ============================================================================
// Selector
// ============================================================================

/// Normalizes an externally supplied selector value.
///
/// Absent or empty values fall back to [`DEFAULT_SELECTOR`].
#[must_use]
pub fn selector_or_default(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => DEFAULT_SELECTOR.to_owned(),
    }
}

/// Reads the override selector from the process environment.
#[must_use]
pub fn selector() -> String {
    let value = env::var(SELECTOR_ENV).ok();
    selector_or_default(value.as_deref())
}

// ============================================================================
// Tests
// ============================================================================
