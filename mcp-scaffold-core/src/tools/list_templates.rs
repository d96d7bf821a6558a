//! List the available project templates.

use crate::store::TemplateStore;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use server_common::CallEnvelope;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct ListTemplatesInput {}

pub async fn execute(store: &Arc<TemplateStore>, _input: ListTemplatesInput) -> Result<CallEnvelope> {
    // A missing root is a reportable condition, not a dispatch failure.
    if !store.root().is_dir() {
        return Ok(CallEnvelope::soft_failure(format!(
            "templates directory not found: {}",
            store.root().display()
        )));
    }

    let templates = store.list()?;
    let count = templates.len();

    Ok(CallEnvelope::success(json!({
        "templates": templates,
        "count": count
    })))
}
