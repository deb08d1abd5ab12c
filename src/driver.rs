//! Driver trait seam for the external browser-control collaborator.
//!
//! This crate does not speak to a browser engine itself. It drives any
//! WebDriver-style library through the [`Driver`] trait, which exposes the
//! small surface the DSL needs: navigation, one-level context switching and
//! window bookkeeping. Wire-level concerns (sessions, locators, timeouts)
//! stay inside the implementing library.
//!
//! # Context contract
//!
//! A failed switch (`switch_to_frame`, `switch_to_window`, `switch_to_alert`)
//! must leave the current context unchanged. The scope helpers rely on this:
//! an entry failure propagates without a restoration step.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

// ============================================================================
// ElementHandle
// ============================================================================

/// Opaque reference to a previously located element.
///
/// The DSL never inspects the contents; it is handed back to the driver when
/// switching to a frame by element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Creates an element handle from a driver-issued reference.
    #[inline]
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the raw driver-issued reference.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// FrameTarget
// ============================================================================

/// Selects a nested browsing context to switch into.
///
/// For [`FrameTarget::NameOrId`], an implementation must prefer a frame whose
/// `name` matches over one whose element identifier matches when both could
/// apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameTarget {
    /// Zero-based frame index.
    Index(usize),
    /// Frame name, falling back to element identifier.
    NameOrId(String),
    /// Previously located iframe element.
    Element(ElementHandle),
}

impl fmt::Display for FrameTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {index}"),
            Self::NameOrId(name) => write!(f, "name or id {name:?}"),
            Self::Element(handle) => write!(f, "element {handle}"),
        }
    }
}

impl From<usize> for FrameTarget {
    #[inline]
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for FrameTarget {
    #[inline]
    fn from(name_or_id: &str) -> Self {
        Self::NameOrId(name_or_id.to_owned())
    }
}

impl From<String> for FrameTarget {
    #[inline]
    fn from(name_or_id: String) -> Self {
        Self::NameOrId(name_or_id)
    }
}

impl From<ElementHandle> for FrameTarget {
    #[inline]
    fn from(handle: ElementHandle) -> Self {
        Self::Element(handle)
    }
}

// ============================================================================
// Alert
// ============================================================================

/// Handle to an open modal dialog.
///
/// Obtained from [`Driver::switch_to_alert`]. `accept` and `dismiss` close
/// the dialog; further calls on the handle afterwards are implementation
/// defined and should be avoided.
#[async_trait]
pub trait Alert: Send + Sync {
    /// Accepts the dialog.
    async fn accept(&self) -> Result<()>;

    /// Dismisses the dialog.
    async fn dismiss(&self) -> Result<()>;

    /// Returns the dialog message text.
    async fn text(&self) -> Result<String>;

    /// Types text into a prompt dialog.
    async fn send_text(&self, text: &str) -> Result<()>;
}

// ============================================================================
// Driver
// ============================================================================

/// WebDriver-style browser control surface consumed by the DSL.
///
/// Implementations are handles: methods take `&self` and internal state uses
/// interior mutability. One driver instance is exclusively owned by one
/// [`Browser`](crate::Browser) session.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigates the current context to a URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Navigation`](crate::Error::Navigation) when the URL
    /// is unreachable.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Returns the current URL, post-redirect.
    async fn current_url(&self) -> Result<String>;

    /// Terminates the browser session.
    async fn quit(&self) -> Result<()>;

    /// Switches to the active modal dialog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDialogPresent`](crate::Error::NoDialogPresent) when
    /// no dialog is open.
    async fn switch_to_alert(&self) -> Result<Box<dyn Alert>>;

    /// Switches back to the top-level default content.
    async fn switch_to_default_content(&self) -> Result<()>;

    /// Switches into a nested browsing context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFrameFound`](crate::Error::NoFrameFound) when the
    /// target cannot be resolved.
    async fn switch_to_frame(&self, target: &FrameTarget) -> Result<()>;

    /// Switches to the window with the given handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchWindow`](crate::Error::NoSuchWindow) when the
    /// handle does not exist.
    async fn switch_to_window(&self, handle: &str) -> Result<()>;

    /// Returns the handle of the current window.
    async fn current_window_handle(&self) -> Result<String>;

    /// Returns the handles of all open windows, without duplicates.
    async fn all_window_handles(&self) -> Result<Vec<String>>;

    /// Closes the current window.
    async fn close_current_window(&self) -> Result<()>;
}

/// Boxed driver as held by a session.
pub type BoxDriver = Box<dyn Driver>;

// ============================================================================
// Tests
// ============================================================================
