//! Alert scope helper.

use std::future::Future;

use tracing::debug;

use crate::driver::Alert;
use crate::error::{Error, Result};
use crate::scope::with_scope;

use super::Browser;

// ============================================================================
// Browser - Alert Scope
// ============================================================================

impl Browser {
    /// Runs a block against the active modal dialog, restoring the default
    /// content context afterwards.
    ///
    /// The body receives the dialog handle (`accept`, `dismiss`, `text`,
    /// `send_text`). After the body, a dialog still left open is dismissed
    /// automatically so it cannot block subsequent automation; restoration to
    /// the top-level content runs regardless of the alert's outcome.
    ///
    /// # Errors
    ///
    /// - [`Error::NoDialogPresent`] when no dialog exists on entry.
    /// - Body failures propagate after restoration; see
    ///   [`Error::Restore`] for restoration failures.
    ///
    /// # Example
    ///
    /// ```ignore
    /// browser
    ///     .with_alert(|alert| async move {
    ///         assert_eq!(alert.text().await?, "Are you sure?");
    ///         alert.accept().await
    ///     })
    ///     .await?;
    /// ```
    pub async fn with_alert<R, Fut>(&self, body: impl FnOnce(Box<dyn Alert>) -> Fut) -> Result<R>
    where
        Fut: Future<Output = Result<R>>,
    {
        debug!(session_id = %self.session_id(), "Entering alert scope");
        let driver = self.driver();

        with_scope(
            || async move { driver.switch_to_alert().await },
            body,
            || async move {
                // Safety net: a dialog left open would block everything after
                // this scope.
                match driver.switch_to_alert().await {
                    Ok(lingering) => lingering.dismiss().await?,
                    Err(Error::NoDialogPresent) => {}
                    Err(e) => return Err(e),
                }
                driver.switch_to_default_content().await
            },
        )
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================
