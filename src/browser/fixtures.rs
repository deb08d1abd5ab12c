//! In-memory driver double for unit tests.
//!
//! [`FakeDriver`] models just enough of a browser to exercise the DSL:
//! windows, frames, one modal dialog, redirects and injected failures. Every
//! driver call is appended to an operation log so tests can assert ordering
//! (restoration-before-propagation, close-before-switch-back).

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::config::Setup;
use crate::driver::{Alert, BoxDriver, Driver, FrameTarget};
use crate::error::{Error, Result};

// ============================================================================
// State
// ============================================================================

/// A frame the fake can switch into.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeFrame {
    pub name: Option<String>,
    pub id: Option<String>,
    pub element: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    current_url: String,
    windows: Vec<String>,
    current_window: String,
    frames: Vec<FakeFrame>,
    entered_frame: Option<usize>,
    alert_text: Option<String>,
    alert_input: String,
    quit: bool,
    redirects: FxHashMap<String, String>,
    unreachable: HashSet<String>,
    failures: HashSet<&'static str>,
    calls: Vec<String>,
}

// ============================================================================
// FakeDriver
// ============================================================================

/// Cloneable in-memory driver handle.
#[derive(Clone, Default)]
pub(crate) struct FakeDriver {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDriver {
    /// Creates a fake with one open window `w-main` on `about:blank`.
    pub fn new() -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock();
            state.current_url = "about:blank".into();
            state.windows = vec!["w-main".into()];
            state.current_window = "w-main".into();
        }
        fake
    }

    // ------------------------------------------------------------------
    // Scenario setup
    // ------------------------------------------------------------------

    pub fn add_window(&self, handle: &str) {
        self.state.lock().windows.push(handle.into());
    }

    pub fn add_frame(&self, frame: FakeFrame) {
        self.state.lock().frames.push(frame);
    }

    pub fn open_alert(&self, text: &str) {
        self.state.lock().alert_text = Some(text.into());
    }

    pub fn set_redirect(&self, from: &str, to: &str) {
        self.state.lock().redirects.insert(from.into(), to.into());
    }

    pub fn set_unreachable(&self, url: &str) {
        self.state.lock().unreachable.insert(url.into());
    }

    pub fn set_current_url(&self, url: &str) {
        self.state.lock().current_url = url.into();
    }

    /// Makes the named driver operation always fail.
    pub fn fail_on(&self, op: &'static str) {
        self.state.lock().failures.insert(op);
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn quit_called(&self) -> bool {
        self.state.lock().quit
    }

    pub fn alert_open(&self) -> bool {
        self.state.lock().alert_text.is_some()
    }

    pub fn alert_input(&self) -> String {
        self.state.lock().alert_input.clone()
    }

    pub fn open_windows(&self) -> Vec<String> {
        self.state.lock().windows.clone()
    }

    /// Current context as `window/frame` for restoration assertions.
    pub fn context(&self) -> String {
        let state = self.state.lock();
        let frame = match state.entered_frame {
            Some(index) => format!("frame#{index}"),
            None => "top".into(),
        };
        format!("{}/{}", state.current_window, frame)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn record(&self, call: impl Into<String>) {
        self.state.lock().calls.push(call.into());
    }

    fn maybe_fail(&self, op: &'static str) -> Result<()> {
        if self.state.lock().failures.contains(op) {
            return Err(Error::driver(format!("injected failure in {op}")));
        }
        Ok(())
    }

    fn resolve_frame(&self, target: &FrameTarget) -> Option<usize> {
        let state = self.state.lock();
        match target {
            FrameTarget::Index(index) => state.frames.get(*index).map(|_| *index),
            FrameTarget::NameOrId(key) => {
                // Name match wins over identifier match.
                let by_name = state
                    .frames
                    .iter()
                    .position(|f| f.name.as_deref() == Some(key));
                by_name.or_else(|| {
                    state
                        .frames
                        .iter()
                        .position(|f| f.id.as_deref() == Some(key))
                })
            }
            FrameTarget::Element(handle) => state
                .frames
                .iter()
                .position(|f| f.element.as_deref() == Some(handle.as_str())),
        }
    }
}

// ============================================================================
// Driver Implementation
// ============================================================================

#[async_trait]
impl Driver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(format!("navigate {url}"));
        self.maybe_fail("navigate")?;

        let mut state = self.state.lock();
        if state.unreachable.contains(url) {
            return Err(Error::navigation(url, "unreachable"));
        }
        let landed = state.redirects.get(url).cloned().unwrap_or_else(|| url.into());
        state.current_url = landed;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.maybe_fail("current_url")?;
        Ok(self.state.lock().current_url.clone())
    }

    async fn quit(&self) -> Result<()> {
        self.record("quit");
        self.maybe_fail("quit")?;
        self.state.lock().quit = true;
        Ok(())
    }

    async fn switch_to_alert(&self) -> Result<Box<dyn Alert>> {
        self.record("switch_to_alert");
        self.maybe_fail("switch_to_alert")?;

        if self.state.lock().alert_text.is_none() {
            return Err(Error::NoDialogPresent);
        }
        Ok(Box::new(FakeAlert {
            state: Arc::clone(&self.state),
        }))
    }

    async fn switch_to_default_content(&self) -> Result<()> {
        self.record("switch_to_default_content");
        self.maybe_fail("switch_to_default_content")?;
        self.state.lock().entered_frame = None;
        Ok(())
    }

    async fn switch_to_frame(&self, target: &FrameTarget) -> Result<()> {
        self.record(format!("switch_to_frame {target}"));
        self.maybe_fail("switch_to_frame")?;

        match self.resolve_frame(target) {
            Some(index) => {
                self.state.lock().entered_frame = Some(index);
                Ok(())
            }
            None => Err(Error::no_frame_found(target.to_string())),
        }
    }

    async fn switch_to_window(&self, handle: &str) -> Result<()> {
        self.record(format!("switch_to_window {handle}"));
        self.maybe_fail("switch_to_window")?;

        let mut state = self.state.lock();
        if !state.windows.iter().any(|w| w == handle) {
            return Err(Error::no_such_window(handle));
        }
        state.current_window = handle.into();
        state.entered_frame = None;
        Ok(())
    }

    async fn current_window_handle(&self) -> Result<String> {
        self.maybe_fail("current_window_handle")?;
        Ok(self.state.lock().current_window.clone())
    }

    async fn all_window_handles(&self) -> Result<Vec<String>> {
        self.maybe_fail("all_window_handles")?;
        Ok(self.state.lock().windows.clone())
    }

    async fn close_current_window(&self) -> Result<()> {
        self.record("close_current_window");
        self.maybe_fail("close_current_window")?;

        let mut state = self.state.lock();
        let current = state.current_window.clone();
        state.windows.retain(|w| w != &current);
        Ok(())
    }
}

// ============================================================================
// FakeAlert
// ============================================================================

struct FakeAlert {
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl Alert for FakeAlert {
    async fn accept(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push("alert.accept".into());
        state.alert_text = None;
        Ok(())
    }

    async fn dismiss(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push("alert.dismiss".into());
        state.alert_text = None;
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        self.state
            .lock()
            .alert_text
            .clone()
            .ok_or(Error::NoDialogPresent)
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(format!("alert.send_text {text}"));
        state.alert_input = text.into();
        Ok(())
    }
}

// ============================================================================
// Test Logging
// ============================================================================

/// Enables log output for a test run when `RUST_LOG` is set.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// ============================================================================
// Setup Helpers
// ============================================================================

/// Setup whose factory produces a fresh [`FakeDriver`] per session.
pub(crate) fn test_setup(auto_quit: bool) -> Setup {
    Setup::builder()
        .auto_quit(auto_quit)
        .driver(|| async { Ok(Box::new(FakeDriver::new()) as BoxDriver) })
        .build()
        .unwrap()
}

/// Setup whose factory hands out clones of one shared fake, so tests keep a
/// handle for observation.
pub(crate) fn test_setup_sharing(auto_quit: bool, fake: &FakeDriver) -> Setup {
    let shared = fake.clone();
    Setup::builder()
        .auto_quit(auto_quit)
        .driver(move || {
            let fake = shared.clone();
            async move { Ok(Box::new(fake) as BoxDriver) }
        })
        .build()
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_name_match_wins_over_id_match() {
        let fake = FakeDriver::new();
        fake.add_frame(FakeFrame {
            id: Some("nav".into()),
            ..Default::default()
        });
        fake.add_frame(FakeFrame {
            name: Some("nav".into()),
            ..Default::default()
        });

        fake.switch_to_frame(&FrameTarget::NameOrId("nav".into()))
            .await
            .unwrap();

        // Frame 1 carries the name, frame 0 only the id.
        assert_eq!(fake.context(), "w-main/frame#1");
    }

    #[tokio::test]
    async fn test_redirect_changes_current_url() {
        let fake = FakeDriver::new();
        fake.set_redirect("https://example.com/old", "https://example.com/new");

        fake.navigate("https://example.com/old").await.unwrap();
        assert_eq!(fake.current_url().await.unwrap(), "https://example.com/new");
    }

    #[tokio::test]
    async fn test_close_current_window_removes_handle() {
        let fake = FakeDriver::new();
        fake.add_window("w-popup");
        fake.switch_to_window("w-popup").await.unwrap();

        fake.close_current_window().await.unwrap();
        assert_eq!(fake.open_windows(), vec!["w-main".to_string()]);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let fake = FakeDriver::new();
        fake.fail_on("switch_to_default_content");

        let err = fake.switch_to_default_content().await.unwrap_err();
        assert!(matches!(err, Error::Driver { .. }));
    }
}
