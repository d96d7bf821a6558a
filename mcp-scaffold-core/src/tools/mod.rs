//! Registration for the project-scaffolding tools.

pub mod create_project;
pub mod guidance;
pub mod list_templates;

use crate::store::TemplateStore;
use anyhow::Result;
use server_common::{ToolDescriptor, ToolRegistry};
use std::sync::Arc;

/// Register the scaffolding catalog onto the registry.
pub fn register_tools(registry: &mut ToolRegistry, store: Arc<TemplateStore>) -> Result<()> {
    let s = store.clone();
    registry.register(ToolDescriptor::new(
        "list_templates",
        "List the available project templates.",
        move |input: list_templates::ListTemplatesInput| {
            let s = s.clone();
            Box::pin(async move { list_templates::execute(&s, input).await })
        },
    ))?;

    let s = store.clone();
    registry.register(ToolDescriptor::new(
        "create_project",
        "Create a new project from a template in an existing directory.",
        move |input: create_project::CreateProjectInput| {
            let s = s.clone();
            Box::pin(async move { create_project::execute(&s, input).await })
        },
    ))?;

    let s = store;
    registry.register(ToolDescriptor::new(
        "template_guidance",
        "Fetch the guidance text shipped with a template.",
        move |input: guidance::TemplateGuidanceInput| {
            let s = s.clone();
            Box::pin(async move { guidance::execute(&s, input).await })
        },
    ))?;

    Ok(())
}
