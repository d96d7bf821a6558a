//! Tool descriptors and the static registry.
//!
//! A `ToolDescriptor` binds a unique name to a human-readable description, a
//! JSON input schema, and a handler closure. Descriptors are registered once
//! at startup; the registry is never mutated afterwards.
//!
//! `ToolDescriptor::new` is the typed constructor: it derives the input
//! schema from the input type with `schemars` and wraps the handler so the
//! raw JSON arguments are decoded and `validator`-checked before the handler
//! body runs. A decode or validation failure surfaces as
//! `DispatchError::InvalidArguments` without invoking the handler.

use crate::dispatch::DispatchError;
use crate::envelope::CallEnvelope;
use anyhow::{bail, Result};
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use validator::Validate;

/// Future returned by a tool handler.
pub type HandlerFuture = BoxFuture<'static, Result<CallEnvelope>>;

/// Type-erased handler stored in a descriptor.
pub type Handler = Box<dyn Fn(serde_json::Value) -> HandlerFuture + Send + Sync>;

pub struct ToolDescriptor {
    name: String,
    description: String,
    input_schema: serde_json::Value,
    handler: Handler,
}

impl ToolDescriptor {
    /// Build a descriptor around a typed handler.
    ///
    /// The input type supplies both the schema (via `schemars`) and the
    /// decode/validate step that guards the handler.
    pub fn new<I, F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        I: DeserializeOwned + JsonSchema + Validate + Send + 'static,
        F: Fn(I) -> HandlerFuture + Send + Sync + 'static,
    {
        let input_schema = input_schema_for::<I>();

        let wrapped: Handler = Box::new(move |args: serde_json::Value| {
            let input: I = match serde_json::from_value(args) {
                Ok(input) => input,
                Err(e) => {
                    let err = DispatchError::InvalidArguments(e.to_string());
                    return Box::pin(futures::future::ready(Err(err.into())));
                }
            };

            if let Err(e) = input.validate() {
                let err = DispatchError::InvalidArguments(e.to_string());
                return Box::pin(futures::future::ready(Err(err.into())));
            }

            handler(input)
        });

        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler: wrapped,
        }
    }

    /// Build a descriptor from raw parts, bypassing the typed wrapper.
    ///
    /// The registry still checks the schema invariant at registration time.
    pub fn from_parts(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
        handler: Handler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &serde_json::Value {
        &self.input_schema
    }

    /// Run the handler against raw JSON arguments.
    pub async fn invoke(&self, args: serde_json::Value) -> Result<CallEnvelope> {
        (self.handler)(args).await
    }
}

/// Generate the `inputSchema` value for a tool input type.
fn input_schema_for<I: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(I);
    let mut value =
        serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({"type": "object"}));

    // Wire format carries only type/properties/required.
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }

    value
}

/// Ordered collection of tool descriptors, indexed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Fails on a duplicate name or a schema whose
    /// `required` list names a property that does not exist.
    pub fn register(&mut self, tool: ToolDescriptor) -> Result<()> {
        if self.index.contains_key(tool.name()) {
            bail!("tool '{}' is already registered", tool.name());
        }
        check_schema(tool.name(), tool.input_schema())?;

        self.index.insert(tool.name().to_string(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn check_schema(name: &str, schema: &serde_json::Value) -> Result<()> {
    let properties = schema.get("properties").and_then(|p| p.as_object());

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for field in required {
            let Some(field) = field.as_str() else {
                bail!("tool '{}': schema 'required' entries must be strings", name);
            };
            let known = properties.is_some_and(|p| p.contains_key(field));
            if !known {
                bail!(
                    "tool '{}': schema requires unknown property '{}'",
                    name,
                    field
                );
            }
        }
    }

    Ok(())
}
