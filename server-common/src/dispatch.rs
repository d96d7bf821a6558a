//! Dispatcher: the single boundary between the transport and tool handlers.
//!
//! Two operations, mirroring the MCP surface: `list_tools()` returns every
//! registered descriptor without its handler, in registration order;
//! `call_tool()` routes a name plus raw JSON arguments to the matching
//! handler and converts whatever happens into a `CallOutcome`. No error ever
//! propagates past this boundary; a failing handler becomes a failure
//! envelope with the transport-level error flag set.

use crate::envelope::CallEnvelope;
use crate::registry::ToolRegistry;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Descriptor view handed to callers of `list_tools`. Never the handler.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Result of one dispatched call.
///
/// `is_error` marks a hard failure (handler error or unknown tool) for the
/// transport layer. A soft failure (an envelope the handler itself built
/// with `success: false`) leaves it unset.
#[derive(Debug)]
pub struct CallOutcome {
    pub envelope: CallEnvelope,
    pub is_error: bool,
}

pub struct Dispatcher {
    registry: ToolRegistry,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// List every registered tool in registration order.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.registry
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema().clone(),
            })
            .collect()
    }

    /// Invoke a tool by name. Missing arguments default to an empty object.
    pub async fn call_tool(&self, name: &str, args: Option<serde_json::Value>) -> CallOutcome {
        let Some(tool) = self.registry.get(name) else {
            let err = DispatchError::UnknownTool(name.to_string());
            tracing::warn!(tool = name, "call for unregistered tool");
            return CallOutcome {
                envelope: CallEnvelope::failure(err.to_string()),
                is_error: true,
            };
        };

        let args = args.unwrap_or_else(|| serde_json::json!({}));

        match tool.invoke(args).await {
            Ok(envelope) => CallOutcome {
                envelope,
                is_error: false,
            },
            Err(e) => {
                tracing::debug!(tool = name, error = %e, "tool call failed");
                CallOutcome {
                    envelope: CallEnvelope::failure(e.to_string()),
                    is_error: true,
                }
            }
        }
    }
}
