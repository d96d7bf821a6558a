//! Page-level inspection: current URL, title, and DOM.

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
pub struct GetUrlInput {}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct GetTitleInput {}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(deny_unknown_fields)]
pub struct GetDomInput {}

pub async fn get_url(session: &Arc<Session>, _input: GetUrlInput) -> Result<CallEnvelope> {
    let url = session.current_url().await?;

    Ok(CallEnvelope::success(json!({ "url": url })))
}

pub async fn get_title(session: &Arc<Session>, _input: GetTitleInput) -> Result<CallEnvelope> {
    let title = session.current_title().await?;

    Ok(CallEnvelope::success(json!({ "title": title })))
}

pub async fn get_dom(session: &Arc<Session>, _input: GetDomInput) -> Result<CallEnvelope> {
    let html = session.page_content().await?;

    Ok(CallEnvelope::success(json!({
        "dom": html,
        "type": "text/html"
    })))
}
