//! Navigate to a URL.

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
pub struct NavigateInput {
    /// URL to navigate to
    #[validate(length(min = 1))]
    #[schemars(description = "The URL to navigate to")]
    pub url: String,
}

pub async fn execute(session: &Arc<Session>, input: NavigateInput) -> Result<CallEnvelope> {
    let final_url = session.navigate(&input.url).await?;

    Ok(CallEnvelope::success(json!({
        "url": final_url,
        "status": "navigated"
    })))
}
