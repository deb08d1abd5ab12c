//! Error types for the page-object DSL.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use pagedriver::{Browser, Result};
//!
//! async fn example(browser: &Browser) -> Result<()> {
//!     let url = browser.goto("https://example.com/login").await?;
//!     println!("landed on {url}");
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Navigation | [`Error::MissingUrl`], [`Error::ArrivalVerification`], [`Error::Navigation`] |
//! | Context switching | [`Error::NoDialogPresent`], [`Error::NoFrameFound`], [`Error::NoSuchWindow`], [`Error::NoNewWindow`], [`Error::AmbiguousWindow`] |
//! | Restoration | [`Error::Restore`] |
//! | Collaborator | [`Error::Driver`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging. No variant is ever
/// swallowed by the scope helpers: body failures propagate after restoration,
/// and a restoration failure carries the body failure via [`Error::suppressed`].
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when a setup is incomplete or no global configuration exists.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Page declares no URL, so navigation-by-page is impossible.
    ///
    /// Returned by `Browser::to` before any navigation is attempted.
    #[error("Page has no URL, cannot navigate to it: {page}")]
    MissingUrl {
        /// Type name of the page.
        page: String,
    },

    /// Arrival verification predicate returned false.
    ///
    /// Returned by `Browser::at` and `Browser::to` after the page's
    /// `verify_arrival` check fails.
    #[error("Arrival verification failed for {page}{}", fmt_at(.current_url))]
    ArrivalVerification {
        /// Type name of the page that failed verification.
        page: String,
        /// Current URL at the time of the failure, when obtainable.
        current_url: Option<String>,
    },

    /// Navigation failed or the URL could not be resolved.
    #[error("Navigation failed for {url}: {message}")]
    Navigation {
        /// The URL that failed.
        url: String,
        /// Description of the failure.
        message: String,
    },

    // ========================================================================
    // Context Errors
    // ========================================================================
    /// No modal dialog is present.
    ///
    /// Returned when entering an alert scope without an open dialog.
    #[error("No dialog present")]
    NoDialogPresent,

    /// Frame target could not be resolved.
    #[error("Frame not found: {target}")]
    NoFrameFound {
        /// Description of the frame target.
        target: String,
    },

    /// Window handle does not exist.
    #[error("No such window: {handle}")]
    NoSuchWindow {
        /// The missing window handle.
        handle: String,
    },

    /// No other window is open to switch to.
    ///
    /// Returned by `with_window` inference when the current window is the
    /// only one open.
    #[error("No new window is open")]
    NoNewWindow,

    /// More than one other window is open, cannot auto-select.
    #[error("Cannot auto-select a window: {candidates} candidates open")]
    AmbiguousWindow {
        /// Number of other open windows.
        candidates: usize,
    },

    // ========================================================================
    // Restoration Errors
    // ========================================================================
    /// Context restoration failed after a scope body completed.
    ///
    /// When the body itself had already failed, that failure is attached as
    /// `suppressed` rather than lost.
    #[error("Context restoration failed: {source}")]
    Restore {
        /// The restoration failure.
        source: Box<Error>,
        /// Body failure superseded by the restoration failure, if any.
        suppressed: Option<Box<Error>>,
    },

    // ========================================================================
    // Collaborator Errors
    // ========================================================================
    /// Failure reported by the underlying driver.
    ///
    /// Driver implementations use this for failures outside the taxonomy
    /// above.
    #[error("Driver error: {message}")]
    Driver {
        /// Description of the driver failure.
        message: String,
    },
}

/// Formats the optional current-URL suffix of an arrival failure.
fn fmt_at(current_url: &Option<String>) -> String {
    match current_url {
        Some(url) => format!(" (currently at {url})"),
        None => String::new(),
    }
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a missing-URL error.
    #[inline]
    pub fn missing_url(page: impl Into<String>) -> Self {
        Self::MissingUrl { page: page.into() }
    }

    /// Creates an arrival verification error.
    #[inline]
    pub fn arrival_verification(page: impl Into<String>, current_url: Option<String>) -> Self {
        Self::ArrivalVerification {
            page: page.into(),
            current_url,
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a frame-not-found error.
    #[inline]
    pub fn no_frame_found(target: impl Into<String>) -> Self {
        Self::NoFrameFound {
            target: target.into(),
        }
    }

    /// Creates a no-such-window error.
    #[inline]
    pub fn no_such_window(handle: impl Into<String>) -> Self {
        Self::NoSuchWindow {
            handle: handle.into(),
        }
    }

    /// Creates an ambiguous-window error.
    #[inline]
    pub fn ambiguous_window(candidates: usize) -> Self {
        Self::AmbiguousWindow { candidates }
    }

    /// Creates a restoration error, attaching the body failure it supersedes.
    #[inline]
    pub fn restore(source: Error, suppressed: Option<Error>) -> Self {
        Self::Restore {
            source: Box::new(source),
            suppressed: suppressed.map(Box::new),
        }
    }

    /// Creates a driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a window-selection error.
    #[inline]
    #[must_use]
    pub fn is_window_error(&self) -> bool {
        matches!(
            self,
            Self::NoSuchWindow { .. } | Self::NoNewWindow | Self::AmbiguousWindow { .. }
        )
    }

    /// Returns `true` if this is a context-switching error.
    #[inline]
    #[must_use]
    pub fn is_context_error(&self) -> bool {
        self.is_window_error() || matches!(self, Self::NoDialogPresent | Self::NoFrameFound { .. })
    }

    /// Returns `true` if this is a restoration failure.
    #[inline]
    #[must_use]
    pub fn is_restore_failure(&self) -> bool {
        matches!(self, Self::Restore { .. })
    }

    /// Returns the body failure superseded by a restoration failure, if any.
    #[inline]
    #[must_use]
    pub fn suppressed(&self) -> Option<&Error> {
        match self {
            Self::Restore { suppressed, .. } => suppressed.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
