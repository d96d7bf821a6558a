//! Get text content of an element.

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
pub struct GetTextInput {
    /// CSS selector of the element to read
    #[validate(length(min = 1))]
    #[schemars(description = "CSS selector of the element to get text from")]
    pub selector: String,
}

pub async fn execute(session: &Arc<Session>, input: GetTextInput) -> Result<CallEnvelope> {
    let text = session.read_text(&input.selector).await?;

    Ok(CallEnvelope::success(json!({
        "text": text,
        "selector": input.selector
    })))
}
