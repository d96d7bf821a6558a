//! Fill several form fields in one call.
//!
//! The mapping's iteration order is its insertion order (`serde_json` with
//! `preserve_order`), and fields are filled sequentially in that order,
//! never concurrently.

use crate::session::Session;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use server_common::{CallEnvelope, DispatchError};
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct FillFormInput {
    /// Mapping of CSS selector to the text value to type into it
    #[schemars(description = "Mapping of CSS selector to the text value to type into it")]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

pub async fn execute(session: &Arc<Session>, input: FillFormInput) -> Result<CallEnvelope> {
    let mut pairs = Vec::with_capacity(input.fields.len());
    for (selector, value) in input.fields {
        let Some(text) = value.as_str() else {
            return Err(DispatchError::InvalidArguments(format!(
                "field '{selector}' must map to a string value"
            ))
            .into());
        };
        pairs.push((selector, text.to_string()));
    }

    session.fill_fields(&pairs).await?;

    let selectors: Vec<&String> = pairs.iter().map(|(selector, _)| selector).collect();
    Ok(CallEnvelope::success(json!({
        "status": "filled",
        "count": selectors.len(),
        "selectors": selectors
    })))
}
