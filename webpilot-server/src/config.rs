//! Startup configuration: CLI flags over a JSON config file over defaults.
//!
//! Any invalid value is fatal: `resolve` fails with a descriptive message
//! before a single tool is registered, and the process exits non-zero.

use mcp_webpilot_core::{BrowserKind, SessionConfig, Viewport};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Browser-related CLI flags. Every flag is optional; unset flags fall back
/// to the config file, then to defaults.
#[derive(Debug, Clone, clap::Args)]
pub struct BrowserArgs {
    /// Browser engine: chromium, chrome, or edge
    #[clap(long)]
    pub browser: Option<String>,

    /// Run the browser headless
    #[clap(long)]
    pub headless: Option<bool>,

    /// Viewport width in pixels
    #[clap(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels
    #[clap(long)]
    pub height: Option<u32>,

    /// Default per-operation timeout in milliseconds
    #[clap(long)]
    pub timeout_ms: Option<u64>,

    /// Path to a JSON config file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Custom browser binary path
    #[clap(long)]
    pub browser_path: Option<String>,

    /// Connect to an already-running browser via CDP URL
    #[clap(long)]
    pub cdp_url: Option<String>,
}

/// Shape of the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    browser: Option<BrowserKind>,
    headless: Option<bool>,
    viewport: Option<FileViewport>,
    timeout: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileViewport {
    width: u32,
    height: u32,
}

/// Merge CLI flags, config file, and defaults into the session config.
pub fn resolve(args: &BrowserArgs) -> Result<SessionConfig, ConfigError> {
    let file = match args.config {
        Some(ref path) => load_file(path)?,
        None => FileConfig::default(),
    };

    let defaults = SessionConfig::default();

    let browser = match args.browser.as_deref() {
        Some(raw) => raw.parse::<BrowserKind>().map_err(ConfigError::Invalid)?,
        None => file.browser.unwrap_or(defaults.browser),
    };

    let viewport = Viewport {
        width: args
            .width
            .or(file.viewport.as_ref().map(|v| v.width))
            .unwrap_or(defaults.viewport.width),
        height: args
            .height
            .or(file.viewport.as_ref().map(|v| v.height))
            .unwrap_or(defaults.viewport.height),
    };

    if viewport.width == 0 || viewport.height == 0 {
        return Err(ConfigError::Invalid(format!(
            "viewport dimensions must be positive, got {}x{}",
            viewport.width, viewport.height
        )));
    }

    let default_timeout_ms = args
        .timeout_ms
        .or(file.timeout)
        .unwrap_or(defaults.default_timeout_ms);

    if default_timeout_ms == 0 {
        return Err(ConfigError::Invalid(
            "timeout must be a positive number of milliseconds".to_string(),
        ));
    }

    Ok(SessionConfig {
        browser,
        headless: args.headless.or(file.headless).unwrap_or(defaults.headless),
        viewport,
        default_timeout_ms,
        browser_path: args.browser_path.clone(),
        cdp_url: args.cdp_url.clone(),
    })
}

fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> BrowserArgs {
        BrowserArgs {
            browser: None,
            headless: None,
            width: None,
            height: None,
            timeout_ms: None,
            config: None,
            browser_path: None,
            cdp_url: None,
        }
    }

    fn write_config(json: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, json).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_defaults_without_flags_or_file() {
        let config = resolve(&no_args()).unwrap();
        assert_eq!(config.browser, BrowserKind::Chromium);
        assert!(config.headless);
        assert_eq!(config.viewport.width, 1280);
        assert_eq!(config.viewport.height, 720);
        assert_eq!(config.default_timeout_ms, 30_000);
    }

    #[test]
    fn test_file_values_apply() {
        let (_tmp, path) = write_config(
            r#"{"browser": "edge", "headless": false, "viewport": {"width": 800, "height": 600}, "timeout": 5000}"#,
        );
        let args = BrowserArgs {
            config: Some(path),
            ..no_args()
        };

        let config = resolve(&args).unwrap();
        assert_eq!(config.browser, BrowserKind::Edge);
        assert!(!config.headless);
        assert_eq!(config.viewport.width, 800);
        assert_eq!(config.default_timeout_ms, 5000);
    }

    #[test]
    fn test_flags_override_file() {
        let (_tmp, path) = write_config(r#"{"browser": "edge", "timeout": 5000}"#);
        let args = BrowserArgs {
            browser: Some("chrome".to_string()),
            timeout_ms: Some(1000),
            config: Some(path),
            ..no_args()
        };

        let config = resolve(&args).unwrap();
        assert_eq!(config.browser, BrowserKind::Chrome);
        assert_eq!(config.default_timeout_ms, 1000);
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let (_tmp, path) = write_config(r#"{"viewport": {"width": 0, "height": 600}}"#);
        let args = BrowserArgs {
            config: Some(path),
            ..no_args()
        };

        let err = resolve(&args).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("viewport"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = BrowserArgs {
            timeout_ms: Some(0),
            ..no_args()
        };
        assert!(matches!(resolve(&args), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_browser_rejected() {
        let args = BrowserArgs {
            browser: Some("safari".to_string()),
            ..no_args()
        };

        let err = resolve(&args).unwrap_err();
        assert!(err.to_string().contains("safari"));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let (_tmp, path) = write_config(r#"{"browser": "netscape"}"#);
        let args = BrowserArgs {
            config: Some(path),
            ..no_args()
        };
        assert!(matches!(resolve(&args), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let args = BrowserArgs {
            config: Some(tmp.path().join("absent.json")),
            ..no_args()
        };
        assert!(matches!(resolve(&args), Err(ConfigError::Io { .. })));
    }
}
