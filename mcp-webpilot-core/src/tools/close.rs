//! Close the browser session.
//!
//! Closing is terminal for this process: later browser tool calls fail with
//! a closed-session error. Calling close again is a safe no-op.

use crate::session::Session;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use server_common::CallEnvelope;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct CloseInput {}

pub async fn execute(session: &Arc<Session>, _input: CloseInput) -> Result<CallEnvelope> {
    session.close().await;

    Ok(CallEnvelope::success_message("browser session closed"))
}
