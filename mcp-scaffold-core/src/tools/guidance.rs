//! Fetch the guidance text shipped with a template.

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
pub struct TemplateGuidanceInput {
    /// Template identifier (see list_templates)
    #[validate(length(min = 1))]
    #[schemars(description = "Template identifier (use list_templates to see available templates)")]
    pub template: String,
}

pub async fn execute(
    store: &Arc<TemplateStore>,
    input: TemplateGuidanceInput,
) -> Result<CallEnvelope> {
    match store.guidance(&input.template)? {
        Some(guidance) => Ok(CallEnvelope::success(json!({
            "template": input.template,
            "guidance": guidance
        }))),
        None => Ok(CallEnvelope::soft_failure(format!(
            "no guidance available for template '{}'",
            input.template
        ))),
    }
}
