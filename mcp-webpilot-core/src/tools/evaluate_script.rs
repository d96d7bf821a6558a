//! Execute arbitrary JavaScript in the page.

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
pub struct EvaluateScriptInput {
    /// JavaScript code to execute in the page context
    #[validate(length(min = 1))]
    #[schemars(
        description = "JavaScript expression or code to execute in the page context. The result of the last expression is returned."
    )]
    pub expression: String,
}

pub async fn execute(session: &Arc<Session>, input: EvaluateScriptInput) -> Result<CallEnvelope> {
    let result = session.run_script(&input.expression).await?;

    Ok(CallEnvelope::success(json!({ "result": result })))
}
