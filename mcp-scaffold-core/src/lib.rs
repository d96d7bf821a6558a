//! Project scaffolding tool catalog.
//!
//! A small, independent sub-catalog: template discovery is a file-system
//! scan, project creation shells out to an external generator. Registered
//! alongside the browser catalog on the same registry.

pub mod error;
pub mod store;
pub mod tools;

pub use error::ScaffoldError;
pub use store::{TemplateInfo, TemplateStore};

use anyhow::Result;
use server_common::ToolRegistry;
use std::path::PathBuf;
use std::sync::Arc;

/// Build a template store and register the scaffolding catalog.
pub fn register(
    registry: &mut ToolRegistry,
    templates_root: PathBuf,
    generator: impl Into<String>,
) -> Result<Arc<TemplateStore>> {
    let store = Arc::new(TemplateStore::new(templates_root, generator));
    tools::register_tools(registry, store.clone())?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_catalog() {
        let mut registry = ToolRegistry::new();
        register(&mut registry, PathBuf::from("/tmp/templates"), "cargo").unwrap();

        assert_eq!(registry.len(), 3);
        assert!(registry.get("list_templates").is_some());
        assert!(registry.get("create_project").is_some());
        assert!(registry.get("template_guidance").is_some());
    }
}
