//! Session-level error taxonomy.
//!
//! Engine-level failures are wrapped, never swallowed: the CDP driver maps
//! each failure onto one of these kinds and preserves the underlying message.
//! Handlers let these propagate with `?`; the dispatcher is the only place
//! they turn into failure envelopes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The session was closed; a closed session is never reopened.
    #[error("browser session is closed")]
    ResourceClosed,

    /// The open sequence failed. The session stays unopened and a later call
    /// may retry the launch.
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("script evaluation failed: {0}")]
    ScriptError(String),

    /// Catch-all for engine failures that are none of the above.
    #[error("browser automation failed: {0}")]
    AutomationFailure(String),
}

impl SessionError {
    pub(crate) fn automation(e: impl std::fmt::Display) -> Self {
        Self::AutomationFailure(e.to_string())
    }
}
