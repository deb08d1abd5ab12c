//! Frame scope helpers.

use std::future::Future;

use tracing::debug;

use crate::driver::FrameTarget;
use crate::error::Result;
use crate::page::Page;
use crate::scope::with_scope;

use super::Browser;

// ============================================================================
// Browser - Frame Scope
// ============================================================================

impl Browser {
    /// Runs a block inside a nested browsing context, restoring the top-level
    /// default content afterwards.
    ///
    /// The target converts from a zero-based index, a name-or-identifier
    /// string (name match wins when both could apply) or a previously located
    /// [`ElementHandle`](crate::ElementHandle). Restoration switches back to
    /// default content on success and failure alike.
    ///
    /// # Errors
    ///
    /// - [`Error::NoFrameFound`](crate::Error::NoFrameFound) when the target
    ///   cannot be resolved; the context is left unchanged.
    /// - Body failures propagate after restoration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let title = browser
    ///     .with_frame("nav", || async {
    ///         browser.current_url().await
    ///     })
    ///     .await?;
    /// ```
    pub async fn with_frame<T, R, Fut>(&self, target: T, body: impl FnOnce() -> Fut) -> Result<R>
    where
        T: Into<FrameTarget>,
        Fut: Future<Output = Result<R>>,
    {
        let target = target.into();
        debug!(session_id = %self.session_id(), target = %target, "Entering frame scope");

        let driver = self.driver();
        let target = &target;

        with_scope(
            || async move { driver.switch_to_frame(target).await },
            |()| body(),
            || async move { driver.switch_to_default_content().await },
        )
        .await
    }

    /// Like [`Browser::with_frame`], but constructs and verifies a page
    /// inside the frame before handing it to the body.
    ///
    /// The page goes through the same arrival contract as [`Browser::at`]:
    /// a false predicate fails the scope (after restoration) with
    /// [`Error::ArrivalVerification`](crate::Error::ArrivalVerification).
    pub async fn with_frame_page<T, P, R, Fut>(
        &self,
        target: T,
        factory: impl FnOnce(&Browser) -> P,
        body: impl FnOnce(P) -> Fut,
    ) -> Result<R>
    where
        T: Into<FrameTarget>,
        P: Page,
        Fut: Future<Output = Result<R>>,
    {
        self.with_frame(target, || async move {
            let page = self.at(factory).await?;
            body(page).await
        })
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================
