//! Page Object contract.
//!
//! A page is a structural capability, not a base class: concrete page types
//! implement [`Page`] with an optional declared URL and an arrival
//! verification predicate. [`Browser::at`](crate::Browser::at) and
//! [`Browser::to`](crate::Browser::to) consume the contract.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//! use pagedriver::{Browser, Page, Result};
//!
//! struct LoginPage;
//!
//! #[async_trait]
//! impl Page for LoginPage {
//!     fn url(&self) -> Option<String> {
//!         Some("/login".into())
//!     }
//!
//!     async fn verify_arrival(&self, browser: &Browser) -> Result<bool> {
//!         Ok(browser.current_url().await?.ends_with("/login"))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::browser::Browser;
use crate::error::Result;

// ============================================================================
// Page
// ============================================================================

/// Capability set implemented by concrete page types.
///
/// Both methods have defaults: a page without a URL cannot be navigated to by
/// [`Browser::to`](crate::Browser::to), and a page without a predicate is
/// accepted silently ("no implicit verification").
#[async_trait]
pub trait Page: Send + Sync {
    /// Declared URL of this page, absent when navigation-by-page is
    /// unsupported.
    ///
    /// A relative URL is resolved against the session
    /// [`Setup::base_url`](crate::Setup::base_url) at navigation time.
    fn url(&self) -> Option<String> {
        None
    }

    /// Asserts the browser is positioned on this page.
    ///
    /// Runs after navigation in `to` and immediately in `at`. Returning
    /// `Ok(false)` surfaces as
    /// [`Error::ArrivalVerification`](crate::Error::ArrivalVerification).
    async fn verify_arrival(&self, browser: &Browser) -> Result<bool> {
        let _ = browser;
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================
