//! Take a screenshot (base64 PNG, or saved to a file).

use crate::session::Session;
use anyhow::{Context, Result};
use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use server_common::CallEnvelope;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct ScreenshotInput {
    /// CSS selector to screenshot a specific element (optional, screenshots the viewport if omitted)
    #[schemars(description = "CSS selector to screenshot a specific element (optional)")]
    pub selector: Option<String>,

    /// Capture the full scrollable page instead of just the viewport
    #[serde(default)]
    #[schemars(description = "Capture full scrollable page (default: false)")]
    pub full_page: bool,

    /// File path to save the PNG to instead of returning base64 data
    #[schemars(description = "File path to save the PNG to (optional)")]
    pub path: Option<String>,
}

pub async fn execute(session: &Arc<Session>, input: ScreenshotInput) -> Result<CallEnvelope> {
    let png_bytes = session
        .capture_screenshot(input.selector.as_deref(), input.full_page)
        .await?;

    if let Some(ref path) = input.path {
        tokio::fs::write(path, &png_bytes)
            .await
            .with_context(|| format!("failed to write screenshot to {path}"))?;

        return Ok(CallEnvelope::success(json!({
            "status": "saved",
            "path": path,
            "size_bytes": png_bytes.len()
        })));
    }

    let b64 = base64::engine::general_purpose::STANDARD.encode(&png_bytes);

    Ok(CallEnvelope::success(json!({
        "type": "image",
        "media_type": "image/png",
        "data": b64,
        "size_bytes": png_bytes.len()
    })))
}
