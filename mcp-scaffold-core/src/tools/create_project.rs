//! Create a project from a template via the external generator.

use crate::store::TemplateStore;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use server_common::{CallEnvelope, DispatchError};
use std::path::PathBuf;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct CreateProjectInput {
    /// Name of the project to create
    #[validate(length(min = 1, max = 64))]
    #[schemars(description = "Name of the project to create")]
    pub name: String,

    /// Template identifier (see list_templates)
    #[validate(length(min = 1))]
    #[schemars(description = "Template identifier (use list_templates to see available templates)")]
    pub template: String,

    /// Directory to create the project in
    #[validate(length(min = 1))]
    #[schemars(description = "Existing directory to create the project in")]
    pub directory: String,
}

pub async fn execute(store: &Arc<TemplateStore>, input: CreateProjectInput) -> Result<CallEnvelope> {
    if !input
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DispatchError::InvalidArguments(format!(
            "project name '{}' may only contain letters, digits, '-' and '_'",
            input.name
        ))
        .into());
    }

    let target_dir = PathBuf::from(&input.directory);
    if !target_dir.is_dir() {
        return Ok(CallEnvelope::soft_failure(format!(
            "directory not found: {}",
            input.directory
        )));
    }

    let created = store
        .create_project(&input.name, &input.template, &target_dir)
        .await?;

    Ok(CallEnvelope::success(json!({
        "status": "created",
        "path": created.display().to_string(),
        "template": input.template
    }))
    .with_message(format!("project '{}' created", input.name)))
}
