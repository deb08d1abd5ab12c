//! Session entry points.
//!
//! A session resolves an effective [`Setup`], creates a fresh driver through
//! its factory, runs the caller's block against a [`Browser`], and tears the
//! driver down per `auto_quit` in a guaranteed-cleanup region — the block's
//! failure propagates only after cleanup has run.
//!
//! # Example
//!
//! ```ignore
//! use pagedriver::{Config, Setup};
//!
//! let setup = Setup::builder()
//!     .base_url("https://example.com")
//!     .driver(|| async { my_driver::new_session().await })
//!     .build()?;
//! pagedriver::configure(Config::new(setup));
//!
//! let landed = pagedriver::drive(|browser| async move {
//!     browser.goto("/login").await
//! })
//! .await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;

use tracing::{info, warn};

use crate::browser::Browser;
use crate::config::global;
use crate::config::Setup;
use crate::error::{Error, Result};

// ============================================================================
// Entry Points
// ============================================================================

/// Runs a session against the process-wide configuration, selecting the
/// effective setup with the environment selector.
///
/// # Errors
///
/// [`Error::Config`] when no global configuration has been set; otherwise
/// the block's or cleanup's failure.
pub async fn drive<R, Fut>(block: impl FnOnce(Browser) -> Fut) -> Result<R>
where
    Fut: Future<Output = Result<R>>,
{
    let selector = global::selector();
    drive_as(&selector, block).await
}

/// Runs a session against the process-wide configuration with an explicit
/// override selector, bypassing the environment.
pub async fn drive_as<R, Fut>(selector: &str, block: impl FnOnce(Browser) -> Fut) -> Result<R>
where
    Fut: Future<Output = Result<R>>,
{
    let config = global::current().ok_or_else(|| {
        Error::config("No global configuration set. Call configure() before drive().")
    })?;

    let setup = config.effective(selector).clone();
    info!(selector, "Resolved effective setup for session");

    drive_with(setup, block).await
}

/// Runs a session against a local setup, without touching global state.
///
/// The driver is created from the setup's factory, the block runs with the
/// [`Browser`] facade, and when `auto_quit` is set the driver is quit on
/// every exit path. A block failure propagates after cleanup; a cleanup
/// failure alongside it is logged and superseded by the block's error.
pub async fn drive_with<R, Fut>(setup: Setup, block: impl FnOnce(Browser) -> Fut) -> Result<R>
where
    Fut: Future<Output = Result<R>>,
{
    let auto_quit = setup.auto_quit();
    let browser = Browser::open(setup).await?;
    let session_id = browser.session_id();

    let outcome = block(browser.clone()).await;

    if auto_quit {
        if let Err(quit_err) = browser.quit().await {
            match outcome {
                Ok(_) => return Err(quit_err),
                Err(block_err) => {
                    warn!(
                        session_id = %session_id,
                        error = %quit_err,
                        "Driver quit failed after session block error"
                    );
                    return Err(block_err);
                }
            }
        }
    }

    info!(session_id = %session_id, auto_quit, "Session finished");
    outcome
}

// ============================================================================
// Tests
// ============================================================================
