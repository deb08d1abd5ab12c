//! Browser facade.
//!
//! A [`Browser`] composes the session's [`Setup`] with its exclusively-owned
//! driver and exposes the whole DSL surface:
//!
//! | Concern | Operations |
//! |---------|------------|
//! | Navigation | [`Browser::at`], [`Browser::to`], [`Browser::goto`] |
//! | Alerts | [`Browser::with_alert`] |
//! | Frames | [`Browser::with_frame`], [`Browser::with_frame_page`] |
//! | Windows | [`Browser::with_window`] |
//!
//! Browsers are cheap handles (`Arc` inner) so session blocks can clone them
//! into scopes freely; the driver itself is never shared across sessions.

// ============================================================================
// Submodules
// ============================================================================

/// Alert scope helper.
mod alert;

/// Frame scope helpers.
mod frames;

/// Page navigation: `at`, `to`, `goto`.
mod navigation;

/// Window scope helper and inference.
mod windows;

/// In-memory driver double for unit tests.
#[cfg(test)]
pub(crate) mod fixtures;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::config::Setup;
use crate::driver::{BoxDriver, Driver};
use crate::error::Result;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a browser session.
struct BrowserInner {
    /// Session identifier for log correlation.
    session_id: Uuid,
    /// Setup this session was constructed with.
    setup: Setup,
    /// Exclusively-owned driver.
    driver: BoxDriver,
}

// ============================================================================
// Browser
// ============================================================================

/// A handle to one browser automation session.
///
/// Owns exactly one driver for its lifetime. Usually constructed by
/// [`drive`](crate::drive)/[`drive_with`](crate::drive_with); [`Browser::open`]
/// and [`Browser::with_driver`] exist for custom wiring and tests.
#[derive(Clone)]
pub struct Browser {
    /// Shared inner state.
    inner: Arc<BrowserInner>,
}

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("session_id", &self.inner.session_id)
            .field("setup", &self.inner.setup)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Browser - Construction
// ============================================================================

impl Browser {
    /// Opens a session by invoking the setup's driver factory.
    ///
    /// # Errors
    ///
    /// Returns the factory's error when driver creation fails.
    pub async fn open(setup: Setup) -> Result<Self> {
        let driver = setup.new_driver().await?;
        Ok(Self::with_driver(driver, setup))
    }

    /// Wraps an already-created driver in a session.
    #[must_use]
    pub fn with_driver(driver: BoxDriver, setup: Setup) -> Self {
        let session_id = Uuid::new_v4();
        info!(session_id = %session_id, "Browser session created");

        Self {
            inner: Arc::new(BrowserInner {
                session_id,
                setup,
                driver,
            }),
        }
    }
}

// ============================================================================
// Browser - Accessors
// ============================================================================

impl Browser {
    /// Returns the setup this session was constructed with.
    ///
    /// Read-only for the session's lifetime.
    #[inline]
    #[must_use]
    pub fn setup(&self) -> &Setup {
        &self.inner.setup
    }

    /// Returns the session identifier.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    /// Returns the underlying driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &dyn Driver {
        self.inner.driver.as_ref()
    }

    /// Returns the current URL, post-redirect.
    pub async fn current_url(&self) -> Result<String> {
        self.driver().current_url().await
    }

    /// Terminates the underlying driver session.
    pub async fn quit(&self) -> Result<()> {
        info!(session_id = %self.inner.session_id, "Quitting browser session");
        self.driver().quit().await
    }
}

// ============================================================================
// Tests
// ============================================================================
