//! Select a value in a `<select>` element.

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
pub struct SelectOptionInput {
    /// CSS selector of the select element
    #[validate(length(min = 1))]
    #[schemars(description = "CSS selector of the select element")]
    pub selector: String,

    /// Option value to select
    #[schemars(description = "Value of the option to select")]
    pub value: String,
}

pub async fn execute(session: &Arc<Session>, input: SelectOptionInput) -> Result<CallEnvelope> {
    session.select_option(&input.selector, &input.value).await?;

    Ok(CallEnvelope::success(json!({
        "status": "selected",
        "selector": input.selector,
        "value": input.value
    })))
}
