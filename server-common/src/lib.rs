//! Shared plumbing for the MCP servers in this workspace.
//!
//! Carries the tool-dispatch framework (descriptor, registry, dispatcher,
//! call envelope) plus the pieces every server binary needs: shared CLI
//! arguments, the pmcp bridge, and the Streamable HTTP bootstrap.

pub mod dispatch;
pub mod envelope;
pub mod registry;

pub use dispatch::{CallOutcome, DispatchError, Dispatcher, ToolInfo};
pub use envelope::CallEnvelope;
pub use registry::{Handler, HandlerFuture, ToolDescriptor, ToolRegistry};

use pmcp::server::streamable_http_server::{StreamableHttpServer, StreamableHttpServerConfig};
use pmcp::types::{ServerCapabilities, ToolCapabilities};
use pmcp::{Server, SimpleTool};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// CLI arguments shared across server binaries.
#[derive(Debug, Clone, clap::Args)]
pub struct CliArgs {
    /// Host to bind to
    #[clap(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[clap(long, default_value = "3200")]
    pub port: u16,
}

/// Build a pmcp `Server` whose tool surface is the dispatcher's catalog.
///
/// Every descriptor becomes one `SimpleTool` carrying the descriptor's
/// description and input schema; the tool body routes back through
/// `Dispatcher::call_tool`. A hard-failure outcome maps to a pmcp internal
/// error (the transport-level error indication); everything else returns the
/// serialized envelope unreshaped.
pub fn build_server(
    name: &str,
    version: &str,
    dispatcher: &Arc<Dispatcher>,
) -> pmcp::Result<Server> {
    let mut builder = Server::builder()
        .name(name)
        .version(version.to_string())
        .capabilities(ServerCapabilities {
            tools: Some(ToolCapabilities {
                list_changed: Some(true),
            }),
            ..Default::default()
        });

    for info in dispatcher.list_tools() {
        let call_name = info.name.clone();
        let d = Arc::clone(dispatcher);

        let tool = SimpleTool::new(info.name.clone(), move |args: serde_json::Value, _extra| {
            let d = d.clone();
            let call_name = call_name.clone();
            Box::pin(async move {
                let outcome = d.call_tool(&call_name, Some(args)).await;
                if outcome.is_error {
                    let message = outcome
                        .envelope
                        .error
                        .unwrap_or_else(|| "tool call failed".to_string());
                    return Err(pmcp::Error::internal(message));
                }
                serde_json::to_value(outcome.envelope)
                    .map_err(|e| pmcp::Error::internal(e.to_string()))
            })
        })
        .with_description(info.description)
        .with_schema(info.input_schema);

        builder = builder.tool(info.name, tool);
    }

    builder.build()
}

/// Run an MCP server over Streamable HTTP transport.
///
/// Initializes tracing, binds to the given host:port, and serves until the
/// task is dropped or the listener fails.
pub async fn run_http(server: Server, args: &CliArgs) -> anyhow::Result<()> {
    init_logging();

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    tracing::info!(host = %args.host, port = args.port, "Starting MCP HTTP server");

    let server = Arc::new(Mutex::new(server));

    let config = StreamableHttpServerConfig {
        session_id_generator: None,
        enable_json_response: true,
        event_store: None,
        on_session_initialized: None,
        on_session_closed: None,
        http_middleware: None,
    };

    let http_server = StreamableHttpServer::with_config(addr, server, config);
    let (_bound_addr, server_handle) = http_server.start().await?;

    tracing::info!("MCP server listening on http://{}:{}/mcp", args.host, args.port);

    server_handle.await?;

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cli_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[clap(flatten)]
            server: CliArgs,
        }

        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.server.host, "127.0.0.1");
        assert_eq!(cli.server.port, 3200);
    }

    #[test]
    fn test_cli_args_custom() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[clap(flatten)]
            server: CliArgs,
        }

        let cli = TestCli::parse_from(["test", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(cli.server.host, "0.0.0.0");
        assert_eq!(cli.server.port, 8080);
    }

    #[test]
    fn test_build_server_from_dispatcher() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::from_parts(
                "ping",
                "Reply with pong.",
                json!({"type": "object"}),
                Box::new(|_args| {
                    Box::pin(async { Ok(CallEnvelope::success(json!({"pong": true}))) })
                }),
            ))
            .unwrap();

        let dispatcher = Arc::new(Dispatcher::new(registry));
        let server = build_server("test", "0.0.0", &dispatcher);
        assert!(server.is_ok());
    }
}
