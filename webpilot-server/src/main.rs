//! webpilot MCP server binary.
//!
//! Composes the browser catalog and the scaffolding catalog into one tool
//! registry, serves them over Streamable HTTP, and owns the browser session:
//! a shutdown signal closes the session exactly once before exit.

mod config;

use clap::Parser;
use mcp_scaffold_core::TemplateStore;
use server_common::{Dispatcher, ToolRegistry};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "webpilot-server", about = "Browser automation and scaffolding MCP server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start the MCP server (default when no subcommand given)
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    #[clap(flatten)]
    server: server_common::CliArgs,

    #[clap(flatten)]
    browser: config::BrowserArgs,

    /// Directory containing project templates
    #[clap(long)]
    templates_dir: Option<PathBuf>,

    /// External generator command used by create_project
    #[clap(long, default_value = "cargo")]
    generator: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let args = match cli.command {
        Some(Command::Serve(args)) => args,
        None => ServeArgs::parse_from(["webpilot-server"]),
    };

    run_serve(args).await
}

async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    // Invalid configuration is fatal before any tool registers.
    let session_config = config::resolve(&args.browser)?;

    let templates_root = match args.templates_dir {
        Some(dir) => dir,
        None => TemplateStore::default_root()?,
    };

    let mut registry = ToolRegistry::new();
    let session = mcp_webpilot_core::register(&mut registry, session_config)?;
    mcp_scaffold_core::register(&mut registry, templates_root, args.generator.as_str())?;

    let dispatcher = Arc::new(Dispatcher::new(registry));
    let server = server_common::build_server("webpilot", env!("CARGO_PKG_VERSION"), &dispatcher)?;

    tokio::select! {
        result = server_common::run_http(server, &args.server) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, closing browser");
            session.close().await;
            Ok(())
        }
    }
}
