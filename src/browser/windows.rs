//! Window scope helper and target inference.

use std::future::Future;

use tracing::debug;

use crate::error::{Error, Result};
use crate::scope::with_scope;

use super::Browser;

// ============================================================================
// Browser - Window Scope
// ============================================================================

impl Browser {
    /// Runs a block inside another window, then closes it and switches back.
    ///
    /// With `Some(handle)` the target is explicit. With `None` the target is
    /// inferred: the set of open handles minus the current one must contain
    /// exactly one member. Inference failures happen before any switch.
    ///
    /// After the body, a target that differs from the original window and is
    /// still open is closed *before* switching back; the scope always
    /// finishes on the original handle. This models the popup pattern: the
    /// transient window does not outlive its scope.
    ///
    /// # Errors
    ///
    /// - [`Error::NoNewWindow`] when inference finds no other window.
    /// - [`Error::AmbiguousWindow`] when inference finds several.
    /// - [`Error::NoSuchWindow`] when an explicit handle does not exist.
    /// - Body failures propagate after restoration; see [`Error::Restore`]
    ///   for restoration failures.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Operate on the popup the previous click opened.
    /// let title = browser
    ///     .with_window(None, || async {
    ///         browser.current_url().await
    ///     })
    ///     .await?;
    /// ```
    pub async fn with_window<R, Fut>(
        &self,
        handle: Option<&str>,
        body: impl FnOnce() -> Fut,
    ) -> Result<R>
    where
        Fut: Future<Output = Result<R>>,
    {
        let driver = self.driver();

        let original = driver.current_window_handle().await?;
        let target = match handle {
            Some(explicit) => explicit.to_owned(),
            None => self.infer_other_window(&original).await?,
        };
        debug!(
            session_id = %self.session_id(),
            original = %original,
            target = %target,
            "Entering window scope"
        );

        let original = &original;
        let target = &target;

        with_scope(
            || async move { driver.switch_to_window(target).await },
            |()| body(),
            || async move {
                if target != original {
                    let open = driver.all_window_handles().await?;
                    if open.iter().any(|h| h == target) {
                        // Close the transient window before going back; the
                        // body may have moved elsewhere in the meantime.
                        driver.switch_to_window(target).await?;
                        driver.close_current_window().await?;
                    }
                }
                driver.switch_to_window(original).await
            },
        )
        .await
    }

    /// Picks the only other open window.
    async fn infer_other_window(&self, original: &str) -> Result<String> {
        let mut others: Vec<String> = self
            .driver()
            .all_window_handles()
            .await?
            .into_iter()
            .filter(|h| h != original)
            .collect();

        match others.len() {
            1 => Ok(others.remove(0)),
            0 => Err(Error::NoNewWindow),
            candidates => Err(Error::ambiguous_window(candidates)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
