//! Driver seam between the session state machine and the automation engine.
//!
//! The session never talks to CDP directly; it goes through `Driver` (launch)
//! and `DriverHandle` (per-browser operations). Production uses the
//! chromiumoxide implementation in `cdp.rs`; tests substitute a counting
//! mock, which is how the lazy-open guarantee is verified.

use crate::error::SessionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which browser engine to drive. All three are Chromium-family binaries
/// reachable over CDP; the kind picks which executable is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    Chromium,
    Chrome,
    Edge,
}

impl BrowserKind {
    /// Executable names probed on PATH, in order.
    pub(crate) fn executable_candidates(self) -> &'static [&'static str] {
        match self {
            BrowserKind::Chromium => &["chromium", "chromium-browser"],
            BrowserKind::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            BrowserKind::Edge => &["microsoft-edge", "microsoft-edge-stable", "msedge"],
        }
    }
}

impl FromStr for BrowserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" => Ok(BrowserKind::Chromium),
            "chrome" => Ok(BrowserKind::Chrome),
            "edge" => Ok(BrowserKind::Edge),
            other => Err(format!(
                "unknown browser '{other}' (expected chromium, chrome, or edge)"
            )),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Chrome => "chrome",
            BrowserKind::Edge => "edge",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Configuration for the browser session. Immutable after construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub browser: BrowserKind,
    pub headless: bool,
    pub viewport: Viewport,
    /// Default per-operation timeout, fixed at open time.
    pub default_timeout_ms: u64,
    /// Custom browser binary path, overriding kind-based discovery.
    pub browser_path: Option<String>,
    /// Attach to an already-running browser via CDP URL instead of launching.
    pub cdp_url: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chromium,
            headless: true,
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            default_timeout_ms: 30_000,
            browser_path: None,
            cdp_url: None,
        }
    }
}

/// Launches (or attaches to) a browser and hands back an operation handle.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn launch(&self, config: &SessionConfig) -> Result<Box<dyn DriverHandle>, SessionError>;
}

/// Operations on one live browser with one page.
///
/// Implementations map engine failures onto the `SessionError` taxonomy and
/// otherwise delegate one-to-one.
#[async_trait]
pub trait DriverHandle: Send + Sync {
    /// Navigate and return the final URL after any redirects.
    async fn navigate(&self, url: &str) -> Result<String, SessionError>;

    async fn go_back(&self) -> Result<(), SessionError>;

    async fn go_forward(&self) -> Result<(), SessionError>;

    async fn reload(&self) -> Result<(), SessionError>;

    async fn click(&self, selector: &str) -> Result<(), SessionError>;

    /// Focus the element and type text into it.
    async fn type_into(&self, selector: &str, text: &str) -> Result<(), SessionError>;

    /// Set a `<select>` (or any value-carrying element) and fire input/change.
    async fn select_option(&self, selector: &str, value: &str) -> Result<(), SessionError>;

    async fn read_text(&self, selector: &str) -> Result<String, SessionError>;

    async fn current_url(&self) -> Result<String, SessionError>;

    async fn current_title(&self) -> Result<String, SessionError>;

    /// Full page HTML.
    async fn page_content(&self) -> Result<String, SessionError>;

    /// Poll for a selector; returns elapsed milliseconds once present.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64)
        -> Result<u64, SessionError>;

    /// Evaluate a JavaScript expression in the page, returning its value
    /// (null when the result is not serializable).
    async fn run_script(&self, code: &str) -> Result<serde_json::Value, SessionError>;

    /// PNG bytes of the viewport, the full page, or one element.
    async fn screenshot(
        &self,
        selector: Option<&str>,
        full_page: bool,
    ) -> Result<Vec<u8>, SessionError>;

    /// Release the browser. Called exactly once, on session close.
    async fn close(&mut self) -> Result<(), SessionError>;
}
