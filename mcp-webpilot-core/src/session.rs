//! Browser session resource: one lazily-opened browser per process.
//!
//! The session is a three-state machine: `Unopened → Open → Closed`. The
//! browser launches on the first operation that needs it, and `Closed` is
//! terminal: a closed session is never reopened; a fresh `Session` would be
//! required. A failed launch leaves the state `Unopened`, so a later call
//! retries.
//!
//! Callers are expected to serialize tool calls (one in flight at a time);
//! the internal mutex only protects the state machine itself, it is not a
//! scheduling queue.

use crate::driver::{Driver, DriverHandle, SessionConfig};
use crate::error::SessionError;
use crate::snapshot::{self, PageSnapshot, SnapshotElement};
use std::sync::Arc;
use tokio::sync::Mutex;

enum State {
    Unopened,
    Open(Box<dyn DriverHandle>),
    Closed,
}

pub struct Session {
    driver: Arc<dyn Driver>,
    config: SessionConfig,
    state: Mutex<State>,
}

impl Session {
    pub fn new(driver: Arc<dyn Driver>, config: SessionConfig) -> Self {
        Self {
            driver,
            config,
            state: Mutex::new(State::Unopened),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open the browser now instead of on first use.
    pub async fn ensure_open(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        self.open_locked(&mut state).await.map(|_| ())
    }

    /// Lazily open, returning the live handle. `Closed` is terminal.
    async fn open_locked<'a>(
        &self,
        state: &'a mut State,
    ) -> Result<&'a dyn DriverHandle, SessionError> {
        if matches!(state, State::Closed) {
            return Err(SessionError::ResourceClosed);
        }

        if matches!(state, State::Unopened) {
            // Launch failure leaves the state Unopened: retryable.
            let handle = self.driver.launch(&self.config).await?;
            *state = State::Open(handle);
        }

        match state {
            State::Open(handle) => Ok(&**handle),
            _ => Err(SessionError::ResourceClosed),
        }
    }

    pub async fn navigate(&self, url: &str) -> Result<String, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.navigate(url).await
    }

    pub async fn go_back(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.go_back().await
    }

    pub async fn go_forward(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.go_forward().await
    }

    pub async fn reload(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.reload().await
    }

    pub async fn click(&self, selector: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.click(selector).await
    }

    pub async fn type_into(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.type_into(selector, text).await
    }

    pub async fn select_option(&self, selector: &str, value: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.select_option(selector, value).await
    }

    /// Fill several fields sequentially, in the given order.
    pub async fn fill_fields(&self, fields: &[(String, String)]) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        for (selector, value) in fields {
            handle.type_into(selector, value).await?;
        }
        Ok(())
    }

    pub async fn read_text(&self, selector: &str) -> Result<String, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.read_text(selector).await
    }

    pub async fn current_url(&self) -> Result<String, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.current_url().await
    }

    pub async fn current_title(&self) -> Result<String, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.current_title().await
    }

    pub async fn page_content(&self) -> Result<String, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.page_content().await
    }

    /// Wait for a selector, with an optional per-call timeout override.
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout_ms: Option<u64>,
    ) -> Result<u64, SessionError> {
        let timeout = timeout_ms.unwrap_or(self.config.default_timeout_ms);
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.wait_for_selector(selector, timeout).await
    }

    pub async fn run_script(&self, code: &str) -> Result<serde_json::Value, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.run_script(code).await
    }

    pub async fn capture_screenshot(
        &self,
        selector: Option<&str>,
        full_page: bool,
    ) -> Result<Vec<u8>, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;
        handle.screenshot(selector, full_page).await
    }

    /// Structural snapshot: URL, title, and the relevant interactive
    /// elements. A page with no matches yields an empty list, not an error.
    pub async fn capture_snapshot(&self) -> Result<PageSnapshot, SessionError> {
        let mut state = self.state.lock().await;
        let handle = self.open_locked(&mut state).await?;

        let url = handle.current_url().await?;
        let title = handle.current_title().await?;
        let raw = handle.run_script(snapshot::INTERACTIVE_ELEMENTS_JS).await?;

        let elements: Vec<SnapshotElement> = serde_json::from_value(raw).unwrap_or_default();

        Ok(PageSnapshot {
            url,
            title,
            elements: snapshot::keep_relevant(elements),
        })
    }

    /// Tear the browser down. Idempotent: every path ends in `Closed`, and
    /// release failures are logged and swallowed so shutdown always
    /// completes. An unopened session closes without ever launching.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, State::Closed) {
            State::Open(mut handle) => {
                if let Err(e) = handle.close().await {
                    tracing::warn!(error = %e, "browser close failed");
                } else {
                    tracing::info!("browser session closed");
                }
            }
            State::Unopened | State::Closed => {}
        }
    }

    /// Whether the session has reached its terminal state.
    pub async fn is_closed(&self) -> bool {
        matches!(*self.state.lock().await, State::Closed)
    }
}
