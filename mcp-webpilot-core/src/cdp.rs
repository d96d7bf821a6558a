//! chromiumoxide-backed driver.
//!
//! One browser, one page, driven over the Chrome DevTools Protocol. Engine
//! failures are mapped onto the `SessionError` taxonomy here so the session
//! and the tools never see raw CDP errors.

use crate::driver::{BrowserKind, Driver, DriverHandle, SessionConfig};
use crate::error::SessionError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, GetNavigationHistoryParams,
    NavigateToHistoryEntryParams, ReloadParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Launches Chromium-family browsers (or attaches over a CDP URL).
#[derive(Debug, Default)]
pub struct CdpDriver;

impl CdpDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Driver for CdpDriver {
    async fn launch(&self, config: &SessionConfig) -> Result<Box<dyn DriverHandle>, SessionError> {
        let (browser, handler_task) = if let Some(ref cdp_url) = config.cdp_url {
            let (browser, mut handler) = Browser::connect(cdp_url).await.map_err(|e| {
                SessionError::LaunchFailed(format!("connect to {cdp_url} failed: {e}"))
            })?;

            let handler_task = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            (browser, handler_task)
        } else {
            let mut builder = BrowserConfig::builder();

            if let Some(executable) = resolve_executable(config)? {
                builder = builder.chrome_executable(executable);
            }

            if !config.headless {
                builder = builder.with_head();
            }

            builder = builder.window_size(config.viewport.width, config.viewport.height);

            // Chrome args for stability inside containers
            builder = builder
                .arg("--disable-dev-shm-usage")
                .arg("--remote-allow-origins=*");

            let browser_config = builder
                .build()
                .map_err(SessionError::LaunchFailed)?;

            let (browser, mut handler) = Browser::launch(browser_config)
                .await
                .map_err(|e| SessionError::LaunchFailed(e.to_string()))?;

            let handler_task = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            (browser, handler_task)
        };

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::LaunchFailed(format!("failed to create page: {e}")))?;

        tracing::info!(browser = %config.browser, headless = config.headless, "browser session opened");

        Ok(Box::new(CdpHandle {
            browser,
            page,
            handler_task,
            default_timeout: Duration::from_millis(config.default_timeout_ms),
        }))
    }
}

/// Pick the browser binary: explicit path wins, then a PATH probe for the
/// configured kind. Chromium falls back to chromiumoxide's own detection.
fn resolve_executable(config: &SessionConfig) -> Result<Option<PathBuf>, SessionError> {
    if let Some(ref path) = config.browser_path {
        return Ok(Some(PathBuf::from(path)));
    }

    match find_on_path(config.browser) {
        Some(found) => Ok(Some(found)),
        None if config.browser == BrowserKind::Chromium => Ok(None),
        None => Err(SessionError::LaunchFailed(format!(
            "could not locate a {} executable on PATH",
            config.browser
        ))),
    }
}

fn find_on_path(kind: BrowserKind) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        for name in kind.executable_candidates() {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

pub struct CdpHandle {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    default_timeout: Duration,
}

impl CdpHandle {
    /// Bound an engine call by the session's default timeout.
    async fn bounded<T, F>(&self, operation: &str, fut: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>>,
    {
        match tokio::time::timeout(self.default_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::Timeout {
                operation: operation.to_string(),
                timeout_ms: self.default_timeout.as_millis() as u64,
            }),
        }
    }

    async fn find_element(
        &self,
        selector: &str,
    ) -> Result<chromiumoxide::element::Element, SessionError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| SessionError::ElementNotFound {
                selector: selector.to_string(),
            })
    }
}

#[async_trait]
impl DriverHandle for CdpHandle {
    async fn navigate(&self, url: &str) -> Result<String, SessionError> {
        self.bounded("navigation", async {
            self.page
                .goto(url)
                .await
                .map_err(SessionError::automation)?;

            let final_url = self
                .page
                .url()
                .await
                .map_err(SessionError::automation)?
                .unwrap_or_default();
            Ok(final_url)
        })
        .await
    }

    async fn go_back(&self) -> Result<(), SessionError> {
        let history = self
            .page
            .execute(GetNavigationHistoryParams::default())
            .await
            .map_err(SessionError::automation)?;

        let target = history.current_index - 1;
        let entry = usize::try_from(target)
            .ok()
            .and_then(|i| history.entries.get(i))
            .ok_or_else(|| SessionError::automation("no previous entry in history"))?;

        self.page
            .execute(NavigateToHistoryEntryParams::new(entry.id))
            .await
            .map_err(SessionError::automation)?;
        Ok(())
    }

    async fn go_forward(&self) -> Result<(), SessionError> {
        let history = self
            .page
            .execute(GetNavigationHistoryParams::default())
            .await
            .map_err(SessionError::automation)?;

        let target = history.current_index + 1;
        let entry = usize::try_from(target)
            .ok()
            .and_then(|i| history.entries.get(i))
            .ok_or_else(|| SessionError::automation("no next entry in history"))?;

        self.page
            .execute(NavigateToHistoryEntryParams::new(entry.id))
            .await
            .map_err(SessionError::automation)?;
        Ok(())
    }

    async fn reload(&self) -> Result<(), SessionError> {
        self.bounded("reload", async {
            self.page
                .execute(ReloadParams::default())
                .await
                .map_err(SessionError::automation)?;
            Ok(())
        })
        .await
    }

    async fn click(&self, selector: &str) -> Result<(), SessionError> {
        let element = self.find_element(selector).await?;
        element.click().await.map_err(SessionError::automation)?;
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        let element = self.find_element(selector).await?;

        // Click to focus first, then type
        element.click().await.map_err(SessionError::automation)?;
        element
            .type_str(text)
            .await
            .map_err(SessionError::automation)?;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), SessionError> {
        let sel = serde_json::to_string(selector).map_err(SessionError::automation)?;
        let val = serde_json::to_string(value).map_err(SessionError::automation)?;

        // Set the value and fire the events a user interaction would.
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return "missing";
                el.value = {val};
                el.dispatchEvent(new Event("input", {{ bubbles: true }}));
                el.dispatchEvent(new Event("change", {{ bubbles: true }}));
                return "ok";
            }})()"#
        );

        let outcome: String = self
            .page
            .evaluate_expression(script)
            .await
            .map_err(|e| SessionError::ScriptError(e.to_string()))?
            .into_value()
            .unwrap_or_default();

        if outcome != "ok" {
            return Err(SessionError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }

    async fn read_text(&self, selector: &str) -> Result<String, SessionError> {
        let element = self.find_element(selector).await?;
        let text = element
            .inner_text()
            .await
            .map_err(SessionError::automation)?
            .unwrap_or_default();
        Ok(text)
    }

    async fn current_url(&self) -> Result<String, SessionError> {
        let url = self
            .page
            .url()
            .await
            .map_err(SessionError::automation)?
            .unwrap_or_default();
        Ok(url)
    }

    async fn current_title(&self) -> Result<String, SessionError> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(SessionError::automation)?
            .unwrap_or_default();
        Ok(title)
    }

    async fn page_content(&self) -> Result<String, SessionError> {
        self.page.content().await.map_err(SessionError::automation)
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout_ms: u64,
    ) -> Result<u64, SessionError> {
        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(timeout_ms);
        let interval = Duration::from_millis(100);

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(start.elapsed().as_millis() as u64);
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(SessionError::Timeout {
                    operation: format!("wait for '{selector}'"),
                    timeout_ms,
                });
            }
            tokio::time::sleep(interval.min(timeout - elapsed)).await;
        }
    }

    async fn run_script(&self, code: &str) -> Result<serde_json::Value, SessionError> {
        let result = self
            .page
            .evaluate_expression(code)
            .await
            .map_err(|e| SessionError::ScriptError(e.to_string()))?;

        // Non-serializable results come back as null
        Ok(result
            .into_value::<serde_json::Value>()
            .unwrap_or(serde_json::Value::Null))
    }

    async fn screenshot(
        &self,
        selector: Option<&str>,
        full_page: bool,
    ) -> Result<Vec<u8>, SessionError> {
        let png = if let Some(selector) = selector {
            let element = self.find_element(selector).await?;
            element
                .screenshot(CaptureScreenshotFormat::Png)
                .await
                .map_err(SessionError::automation)?
        } else {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .capture_beyond_viewport(full_page)
                .build();

            self.page
                .screenshot(params)
                .await
                .map_err(SessionError::automation)?
        };

        Ok(png)
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(SessionError::automation);
        self.handler_task.abort();
        result
    }
}
