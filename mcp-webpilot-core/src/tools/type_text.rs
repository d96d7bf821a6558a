//! Type text into a form field.

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
pub struct TypeTextInput {
    /// CSS selector of the field to type into
    #[validate(length(min = 1))]
    #[schemars(description = "CSS selector of the field to type into")]
    pub selector: String,

    /// Text to type
    #[schemars(description = "Text value to type into the field")]
    pub text: String,
}

pub async fn execute(session: &Arc<Session>, input: TypeTextInput) -> Result<CallEnvelope> {
    session.type_into(&input.selector, &input.text).await?;

    Ok(CallEnvelope::success(json!({
        "status": "typed",
        "selector": input.selector
    })))
}
