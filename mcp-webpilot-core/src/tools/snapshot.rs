//! Structural snapshot of the page's interactive elements.

use crate::session::Session;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use server_common::CallEnvelope;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct SnapshotInput {}

pub async fn execute(session: &Arc<Session>, _input: SnapshotInput) -> Result<CallEnvelope> {
    let snapshot = session.capture_snapshot().await?;

    Ok(CallEnvelope::success(serde_json::to_value(snapshot)?))
}
