//! Session history navigation: back, forward, reload.

use crate::session::Session;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use server_common::CallEnvelope;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct GoBackInput {}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct GoForwardInput {}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct ReloadInput {}

pub async fn go_back(session: &Arc<Session>, _input: GoBackInput) -> Result<CallEnvelope> {
    session.go_back().await?;
    let url = session.current_url().await?;

    Ok(CallEnvelope::success(json!({
        "status": "back",
        "url": url
    })))
}

pub async fn go_forward(session: &Arc<Session>, _input: GoForwardInput) -> Result<CallEnvelope> {
    session.go_forward().await?;
    let url = session.current_url().await?;

    Ok(CallEnvelope::success(json!({
        "status": "forward",
        "url": url
    })))
}

pub async fn reload(session: &Arc<Session>, _input: ReloadInput) -> Result<CallEnvelope> {
    session.reload().await?;

    Ok(CallEnvelope::success(json!({
        "status": "reloaded"
    })))
}
