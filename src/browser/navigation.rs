//! Page navigation: `at`, `to`, `goto`.
//!
//! `at` verifies the browser is already positioned on a page; `to` navigates
//! to a page's declared URL first; `goto` takes a literal URL. Arrival
//! verification always runs strictly after navigation completes and before
//! the page value is handed back, so a failed predicate never exposes an
//! "arrived" page.

use std::any::type_name;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::page::Page;

use super::Browser;

// ============================================================================
// Browser - Navigation
// ============================================================================

impl Browser {
    /// Constructs a page and verifies the browser is already positioned on
    /// it. No navigation occurs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArrivalVerification`] when the page's predicate
    /// returns false.
    pub async fn at<P, F>(&self, factory: F) -> Result<P>
    where
        P: Page,
        F: FnOnce(&Browser) -> P,
    {
        let page = factory(self);
        debug!(session_id = %self.session_id(), page = type_name::<P>(), "Verifying arrival");

        self.verify(&page, type_name::<P>()).await?;
        Ok(page)
    }

    /// Constructs a page, navigates to its declared URL, then verifies
    /// arrival.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingUrl`] when the page declares no URL; no navigation
    ///   is attempted.
    /// - [`Error::Navigation`] when the driver cannot reach the URL.
    /// - [`Error::ArrivalVerification`] when the predicate fails after
    ///   navigation.
    pub async fn to<P, F>(&self, factory: F) -> Result<P>
    where
        P: Page,
        F: FnOnce(&Browser) -> P,
    {
        let page = factory(self);
        let name = type_name::<P>();

        let raw = page.url().ok_or_else(|| Error::missing_url(name))?;
        let url = self.resolve_url(&raw)?;
        debug!(session_id = %self.session_id(), page = name, url = %url, "Navigating to page");

        self.driver().navigate(&url).await?;
        self.verify(&page, name).await?;
        Ok(page)
    }

    /// Navigates to a literal URL and returns the resulting current URL,
    /// which may differ from the requested one after redirects.
    ///
    /// A relative URL is resolved against the session's base URL.
    pub async fn goto(&self, url: impl AsRef<str>) -> Result<String> {
        let url = self.resolve_url(url.as_ref())?;
        debug!(session_id = %self.session_id(), url = %url, "Navigating");

        self.driver().navigate(&url).await?;
        self.driver().current_url().await
    }
}

// ============================================================================
// Browser - Verification & URL Resolution
// ============================================================================

impl Browser {
    /// Runs a page's arrival predicate, mapping a false result to an error.
    async fn verify<P: Page>(&self, page: &P, name: &str) -> Result<()> {
        if page.verify_arrival(self).await? {
            return Ok(());
        }

        let current_url = self.driver().current_url().await.ok();
        debug!(
            session_id = %self.session_id(),
            page = name,
            current_url = current_url.as_deref().unwrap_or("<unknown>"),
            "Arrival verification failed"
        );
        Err(Error::arrival_verification(name, current_url))
    }

    /// Resolves a page or literal URL against the session's base URL.
    ///
    /// Absolute URLs pass through unchanged; without a base URL, the value
    /// is handed to the driver as-is.
    fn resolve_url(&self, raw: &str) -> Result<String> {
        let Some(base) = self.setup().base_url() else {
            return Ok(raw.to_owned());
        };
        // Parse success alone is not absoluteness: "reports:2024/q3.html"
        // parses with scheme "reports" and no host. Only a real host (or an
        // opaque non-hierarchical URL like "about:blank") passes through;
        // a host:port lookalike is still a relative path to be joined.
        if let Ok(parsed) = Url::parse(raw) {
            if parsed.has_host() || !Self::looks_like_relative_path(&parsed) {
                return Ok(raw.to_owned());
            }
        }

        let base = Url::parse(base).map_err(|e| Error::navigation(base, e.to_string()))?;
        let joined = base
            .join(raw)
            .map_err(|e| Error::navigation(raw, e.to_string()))?;
        // Reference resolution keeps a scheme-shaped value absolute; force
        // the path interpretation when that happens ("./x:1" joins as "x:1").
        let joined = if joined.as_str() == raw {
            base.join(&format!("./{raw}"))
                .map_err(|e| Error::navigation(raw, e.to_string()))?
        } else {
            joined
        };
        Ok(String::from(joined))
    }

    /// True for host-less parses whose "scheme" reads as a path segment with
    /// a port, such as "localhost:8080/x".
    fn looks_like_relative_path(url: &Url) -> bool {
        !url.has_host()
            && url
                .path()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
    }
}

// ============================================================================
// Tests
// ============================================================================
