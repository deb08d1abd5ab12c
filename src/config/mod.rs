//! Session configuration and override resolution.
//!
//! A [`Setup`] describes how one session's driver is created and torn down.
//! A [`Config`] pairs a base setup with a table of named alternatives
//! ("development", "qa", ...) selectable at runtime; [`Config::effective`]
//! performs the resolution. Process-wide state lives in [`global`].
//!
//! # Example
//!
//! ```ignore
//! use pagedriver::{Config, Setup};
//!
//! let base = Setup::builder()
//!     .base_url("https://example.com")
//!     .driver(|| async { my_driver::new_session().await })
//!     .build()?;
//!
//! let qa = Setup::builder()
//!     .auto_quit(false)
//!     .base_url("https://qa.example.com")
//!     .driver(|| async { my_driver::new_session().await })
//!     .build()?;
//!
//! let config = Config::new(base).with_override("qa", qa);
//! pagedriver::configure(config);
//! ```

// ============================================================================
// Modules
// ============================================================================

/// Process-wide configuration state and the environment selector.
pub mod global;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use rustc_hash::FxHashMap;

use crate::driver::BoxDriver;
use crate::error::{Error, Result};

// ============================================================================
// DriverFactory
// ============================================================================

/// Factory invoked once per session to create a fresh driver.
///
/// Shared across setup clones; compared by identity, not by behavior.
pub type DriverFactory = Arc<dyn Fn() -> BoxFuture<'static, Result<BoxDriver>> + Send + Sync>;

// ============================================================================
// Setup
// ============================================================================

/// Immutable description of how a session is created and torn down.
///
/// Built through [`Setup::builder`]. Two call-sites exist: the process-wide
/// base inside a [`Config`] (replaced only via [`global::configure`]), and a
/// local value handed to [`drive_with`](crate::drive_with) for a single
/// session.
#[derive(Clone)]
pub struct Setup {
    /// Quit the driver when the session block exits.
    auto_quit: bool,
    /// Base URL that relative page URLs are resolved against.
    base_url: Option<String>,
    /// Creates the session's driver.
    driver_factory: DriverFactory,
}

impl Setup {
    /// Creates a setup builder with defaults: `auto_quit = true`, no base
    /// URL, no factory.
    #[inline]
    #[must_use]
    pub fn builder() -> SetupBuilder {
        SetupBuilder::new()
    }

    /// Returns whether the driver is quit when the session ends.
    #[inline]
    #[must_use]
    pub fn auto_quit(&self) -> bool {
        self.auto_quit
    }

    /// Returns the base URL, if any.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Invokes the driver factory, yielding a fresh driver for one session.
    pub async fn new_driver(&self) -> Result<BoxDriver> {
        (self.driver_factory)().await
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("auto_quit", &self.auto_quit)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Setup {
    /// Value equality on the flags, identity equality on the factory.
    fn eq(&self, other: &Self) -> bool {
        self.auto_quit == other.auto_quit
            && self.base_url == other.base_url
            && Arc::ptr_eq(&self.driver_factory, &other.driver_factory)
    }
}

// ============================================================================
// SetupBuilder
// ============================================================================

/// Builder for a [`Setup`].
#[derive(Default)]
pub struct SetupBuilder {
    auto_quit: Option<bool>,
    base_url: Option<String>,
    driver_factory: Option<DriverFactory>,
}

impl SetupBuilder {
    /// Creates a new builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the driver is quit when the session ends.
    ///
    /// Defaults to `true`.
    #[inline]
    #[must_use]
    pub fn auto_quit(mut self, auto_quit: bool) -> Self {
        self.auto_quit = Some(auto_quit);
        self
    }

    /// Sets the base URL that relative page URLs are resolved against.
    #[inline]
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the driver factory.
    ///
    /// The factory is invoked once per session and must yield a fresh,
    /// exclusively-owned driver each time.
    #[must_use]
    pub fn driver<F, Fut>(mut self, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<BoxDriver>> + Send + 'static,
    {
        self.driver_factory = Some(Arc::new(move || Box::pin(factory())));
        self
    }

    /// Sets a pre-built driver factory.
    ///
    /// Lets several setups share one factory (they then compare equal on it).
    #[inline]
    #[must_use]
    pub fn driver_factory(mut self, factory: DriverFactory) -> Self {
        self.driver_factory = Some(factory);
        self
    }

    /// Builds the setup with validation.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when no driver factory was set.
    pub fn build(self) -> Result<Setup> {
        let driver_factory = self.driver_factory.ok_or_else(|| {
            Error::config(
                "A driver factory is required. Use .driver() to set it.\n\
                 Example: Setup::builder().driver(|| async { my_driver::new_session().await })",
            )
        })?;

        Ok(Setup {
            auto_quit: self.auto_quit.unwrap_or(true),
            base_url: self.base_url,
            driver_factory,
        })
    }
}

// ============================================================================
// Config
// ============================================================================

/// Base setup plus a table of named override setups.
///
/// The override table is empty by default; keys are logical environment
/// names such as `"default"` or `"development"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Setup used when the selector matches no override.
    base: Setup,
    /// Named alternative setups.
    overrides: FxHashMap<String, Setup>,
}

impl Config {
    /// Creates a configuration with an empty override table.
    #[inline]
    #[must_use]
    pub fn new(base: Setup) -> Self {
        Self {
            base,
            overrides: FxHashMap::default(),
        }
    }

    /// Adds a named override setup.
    #[must_use]
    pub fn with_override(mut self, name: impl Into<String>, setup: Setup) -> Self {
        self.overrides.insert(name.into(), setup);
        self
    }

    /// Returns the base setup.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &Setup {
        &self.base
    }

    /// Resolves the effective setup for a selector.
    ///
    /// A lookup miss is normal, not exceptional: the base setup is returned
    /// unchanged. Pure function of its inputs; nothing is mutated.
    #[inline]
    #[must_use]
    pub fn effective(&self, selector: &str) -> &Setup {
        self.overrides.get(selector).unwrap_or(&self.base)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::error::Error;

    fn setup(auto_quit: bool) -> Setup {
        Setup::builder()
            .auto_quit(auto_quit)
            .driver(|| async { Err(Error::driver("test factory")) })
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let setup = Setup::builder()
            .driver(|| async { Err(Error::driver("test factory")) })
            .build()
            .unwrap();

        assert!(setup.auto_quit());
        assert!(setup.base_url().is_none());
    }

    #[test]
    fn test_build_fails_without_factory() {
        let result = Setup::builder().auto_quit(false).build();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(err.to_string().contains("driver factory"));
    }

    #[test]
    fn test_setup_equality_is_by_value_and_factory_identity() {
        let a = setup(true);
        let b = a.clone();
        let c = setup(true);

        // Clones share the factory and compare equal.
        assert_eq!(a, b);
        // Same flags but a distinct factory: not the same setup.
        assert_ne!(a, c);
    }

    #[test]
    fn test_shared_factory_setups_compare_equal() {
        let factory: DriverFactory =
            Arc::new(|| Box::pin(async { Err(Error::driver("test factory")) }));

        let a = Setup::builder()
            .driver_factory(Arc::clone(&factory))
            .build()
            .unwrap();
        let b = Setup::builder().driver_factory(factory).build().unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_effective_empty_overrides_falls_back_to_base() {
        let base = setup(true);
        let config = Config::new(base.clone());

        assert_eq!(config.effective("default"), &base);
    }

    #[test]
    fn test_effective_prefers_matching_override() {
        let base = setup(true);
        let qa = setup(false);
        let config = Config::new(base.clone()).with_override("qa", qa.clone());

        assert_eq!(config.effective("qa"), &qa);
        assert_ne!(config.effective("qa"), &base);
    }

    #[test]
    fn test_effective_miss_with_populated_table_falls_back() {
        let base = setup(true);
        let config = Config::new(base.clone()).with_override("qa", setup(false));

        assert_eq!(config.effective("staging"), &base);
    }

    #[test]
    fn test_effective_does_not_mutate() {
        let base = setup(true);
        let config = Config::new(base.clone()).with_override("qa", setup(false));

        let _ = config.effective("qa");
        let _ = config.effective("missing");

        assert_eq!(config.base(), &base);
    }

    proptest! {
        /// effective(s) is exactly overrides.get(s).unwrap_or(base).
        #[test]
        fn prop_effective_matches_table_lookup(
            names in proptest::collection::vec("[a-z]{1,8}", 0..6),
            selector in "[a-z]{1,8}",
        ) {
            let base = setup(true);
            let mut config = Config::new(base.clone());
            let mut table: Vec<(String, Setup)> = Vec::new();

            for name in names {
                let over = setup(false);
                config = config.with_override(name.clone(), over.clone());
                table.retain(|(n, _)| n != &name);
                table.push((name, over));
            }

            let expected = table
                .iter()
                .find(|(n, _)| n == &selector)
                .map_or(&base, |(_, s)| s);

            prop_assert_eq!(config.effective(&selector), expected);
        }
    }
}
