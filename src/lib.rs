//! Page Object DSL for WebDriver-style browser automation.
//!
//! This library standardizes three concerns on top of any WebDriver-style
//! browser control library (expressed as the [`Driver`] trait):
//!
//! - **Configuration**: global or per-session [`Setup`] values describing how
//!   a driver is created and torn down, with named overrides selectable at
//!   runtime ([`Config`]).
//! - **Page Objects**: concrete page types implement [`Page`] — a declared
//!   URL plus an implicit arrival-verification predicate consumed by
//!   [`Browser::at`] and [`Browser::to`].
//! - **Scoped context switching**: [`Browser::with_alert`],
//!   [`Browser::with_frame`] and [`Browser::with_window`] enter a sub-context,
//!   run a caller block, and guarantee the original context is restored on
//!   every exit path.
//!
//! # Quick Start
//!
//! ```ignore
//! use async_trait::async_trait;
//! use pagedriver::{Browser, Config, Page, Result, Setup};
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
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let setup = Setup::builder()
//!         .base_url("https://example.com")
//!         .driver(|| async { my_driver::new_session().await })
//!         .build()?;
//!     pagedriver::configure(Config::new(setup));
//!
//!     pagedriver::drive(|browser| async move {
//!         let _login = browser.to(|_| LoginPage).await?;
//!
//!         browser
//!             .with_frame("nav", || async { Ok(()) })
//!             .await?;
//!
//!         Ok(())
//!     })
//!     .await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | [`Browser`] facade: navigation and scope helpers |
//! | [`config`] | [`Setup`], [`Config`] and process-wide configuration |
//! | [`driver`] | [`Driver`]/[`Alert`] traits for the external collaborator |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`page`] | [`Page`] contract |
//! | [`scope`] | Generic scoped-acquisition primitive |
//! | [`session`] | [`drive`]/[`drive_as`]/[`drive_with`] entry points |
//!
//! # Guarantees
//!
//! - A session owns exactly one driver; it is quit at session end iff the
//!   effective setup's `auto_quit` is set.
//! - Configuration resolution never mutates the base configuration; an
//!   override miss falls back to the base, never errors.
//! - Scope restoration is never skipped after a successful entry; body
//!   failures propagate afterwards, and a restoration failure carries the
//!   superseded body failure as [`Error::suppressed`].

// ============================================================================
// Modules
// ============================================================================

/// Browser facade: navigation and scoped context switching.
pub mod browser;

/// Session configuration and override resolution.
pub mod config;

/// Driver trait seam for the external browser-control collaborator.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Page Object contract.
pub mod page;

/// Scoped acquisition with guaranteed restoration.
pub mod scope;

/// Session entry points.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Browser facade
pub use browser::Browser;

// Configuration types
pub use config::global::{DEFAULT_SELECTOR, SELECTOR_ENV, configure, current, deconfigure};
pub use config::{Config, DriverFactory, Setup, SetupBuilder};

// Driver seam
pub use driver::{Alert, BoxDriver, Driver, ElementHandle, FrameTarget};

// Error types
pub use error::{Error, Result};

// Page contract
pub use page::Page;

// Scope primitive
pub use scope::with_scope;

// Session entry points
pub use session::{drive, drive_as, drive_with};
