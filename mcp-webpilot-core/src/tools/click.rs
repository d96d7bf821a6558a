//! Click an element by CSS selector.

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
pub struct ClickInput {
    /// CSS selector of the element to click
    #[validate(length(min = 1))]
    #[schemars(description = "CSS selector of the element to click")]
    pub selector: String,
}

pub async fn execute(session: &Arc<Session>, input: ClickInput) -> Result<CallEnvelope> {
    session.click(&input.selector).await?;

    Ok(CallEnvelope::success(json!({
        "status": "clicked",
        "selector": input.selector
    })))
}
