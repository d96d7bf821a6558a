//! Browser automation tool catalog.
//!
//! One lazily-opened browser session (chromiumoxide over CDP) exposed as MCP
//! tools through the shared dispatch framework in `server-common`.

pub mod cdp;
pub mod driver;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod tools;

pub use cdp::CdpDriver;
pub use driver::{BrowserKind, Driver, DriverHandle, SessionConfig, Viewport};
pub use error::SessionError;
pub use session::Session;

use anyhow::Result;
use server_common::ToolRegistry;
use std::sync::Arc;

/// Build a session over the CDP driver and register the browser catalog.
///
/// Returns the session so the binary can close it on shutdown.
pub fn register(registry: &mut ToolRegistry, config: SessionConfig) -> Result<Arc<Session>> {
    let session = Arc::new(Session::new(Arc::new(CdpDriver::new()), config));
    tools::register_tools(registry, session.clone())?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_catalog() {
        let mut registry = ToolRegistry::new();
        let session = register(&mut registry, SessionConfig::default()).unwrap();

        assert_eq!(registry.len(), 17);
        assert!(registry.get("navigate").is_some());
        assert!(registry.get("close_browser").is_some());
        assert_eq!(session.config().viewport.width, 1280);
    }
}
