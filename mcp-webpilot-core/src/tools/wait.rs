//! Wait for a selector to appear.

use crate::session::Session;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use server_common::CallEnvelope;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct WaitForInput {
    /// CSS selector to wait for
    #[validate(length(min = 1))]
    #[schemars(description = "CSS selector to wait for")]
    pub selector: String,

    /// Maximum time to wait in milliseconds (session default if omitted)
    #[validate(range(min = 100, max = 120_000))]
    #[schemars(description = "Maximum time to wait in milliseconds (default: session timeout)")]
    pub timeout_ms: Option<u64>,
}

pub async fn execute(session: &Arc<Session>, input: WaitForInput) -> Result<CallEnvelope> {
    let elapsed_ms = session
        .wait_for_selector(&input.selector, input.timeout_ms)
        .await?;

    Ok(CallEnvelope::success(json!({
        "status": "ready",
        "selector": input.selector,
        "elapsed_ms": elapsed_ms
    })))
}
