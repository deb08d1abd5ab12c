//! Scoped acquisition with guaranteed restoration.
//!
//! The alert, frame and window helpers all share one shape: enter a
//! sub-context, run a caller body, and put the original context back on every
//! exit path. [`with_scope`] implements that shape exactly once; the helpers
//! on [`Browser`](crate::Browser) only supply the enter/restore legs.
//!
//! # State machine
//!
//! `Outside → Entering → InsideBody → Restoring → Outside`
//!
//! - `Entering` failure propagates directly. The driver contract guarantees
//!   a failed switch leaves the context unchanged, so there is nothing to
//!   restore.
//! - Once the body has run, `Restoring` is never skipped — it runs on normal
//!   return and on body failure alike.
//! - A body failure propagates after restoration completes.
//! - A restoration failure surfaces as [`Error::Restore`], with the body
//!   failure (if any) attached as the suppressed error.

use std::future::Future;

use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// with_scope
// ============================================================================

/// Runs `body` inside the context acquired by `enter`, restoring the prior
/// context via `restore` on every exit path.
///
/// `enter` yields the target handle, which the body consumes; `restore`
/// closures capture whatever they need to put the original context back
/// (the handle captured immediately before the switch, not a global history).
///
/// # Errors
///
/// - `enter` failure: propagated as-is, `restore` not invoked.
/// - body failure with successful restoration: propagated as-is.
/// - restoration failure: [`Error::Restore`] carrying the body failure as
///   [`Error::suppressed`] when there was one.
pub async fn with_scope<T, R, EnterFut, BodyFut, RestoreFut>(
    enter: impl FnOnce() -> EnterFut,
    body: impl FnOnce(T) -> BodyFut,
    restore: impl FnOnce() -> RestoreFut,
) -> Result<R>
where
    EnterFut: Future<Output = Result<T>>,
    BodyFut: Future<Output = Result<R>>,
    RestoreFut: Future<Output = Result<()>>,
{
    let target = enter().await?;

    let outcome = body(target).await;
    if let Err(err) = &outcome {
        debug!(error = %err, "Scope body failed, restoring context before propagating");
    }

    match restore().await {
        Ok(()) => outcome,
        Err(restore_err) => Err(Error::restore(restore_err, outcome.err())),
    }
}

// ============================================================================
// Tests
// ============================================================================
