//! Registration for all browser automation tools.

pub mod click;
pub mod close;
pub mod evaluate_script;
pub mod fill_form;
pub mod get_text;
pub mod history;
pub mod inspect;
pub mod navigate;
pub mod screenshot;
pub mod select_option;
pub mod snapshot;
pub mod type_text;
pub mod wait;

use crate::session::Session;
use anyhow::Result;
use server_common::{ToolDescriptor, ToolRegistry};
use std::sync::Arc;

/// Register the browser catalog onto the registry.
///
/// Each tool captures an `Arc<Session>`; the first call that needs the
/// browser triggers the lazy open.
pub fn register_tools(registry: &mut ToolRegistry, session: Arc<Session>) -> Result<()> {
    // --- Navigation ---

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "navigate",
        "Navigate to a URL. Returns the final URL after any redirects.",
        move |input: navigate::NavigateInput| {
            let s = s.clone();
            Box::pin(async move { navigate::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "go_back",
        "Go back one entry in the session history.",
        move |input: history::GoBackInput| {
            let s = s.clone();
            Box::pin(async move { history::go_back(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "go_forward",
        "Go forward one entry in the session history.",
        move |input: history::GoForwardInput| {
            let s = s.clone();
            Box::pin(async move { history::go_forward(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "reload",
        "Reload the current page.",
        move |input: history::ReloadInput| {
            let s = s.clone();
            Box::pin(async move { history::reload(&s, input).await })
        },
    ))?;

    // --- Interaction ---

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "click",
        "Click an element identified by a CSS selector.",
        move |input: click::ClickInput| {
            let s = s.clone();
            Box::pin(async move { click::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "type_text",
        "Type text into a form field identified by a CSS selector.",
        move |input: type_text::TypeTextInput| {
            let s = s.clone();
            Box::pin(async move { type_text::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "select_option",
        "Select an option by value in a select element identified by a CSS selector.",
        move |input: select_option::SelectOptionInput| {
            let s = s.clone();
            Box::pin(async move { select_option::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "fill_form",
        "Fill multiple form fields in one call. Fields are filled sequentially, in the order given.",
        move |input: fill_form::FillFormInput| {
            let s = s.clone();
            Box::pin(async move { fill_form::execute(&s, input).await })
        },
    ))?;

    // --- Inspection ---

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "snapshot",
        "Structural snapshot of the page: URL, title, and interactive elements with their selectors.",
        move |input: snapshot::SnapshotInput| {
            let s = s.clone();
            Box::pin(async move { snapshot::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "screenshot",
        "Take a screenshot of the page or a specific element. Returns base64-encoded PNG, or saves to a file when a path is given.",
        move |input: screenshot::ScreenshotInput| {
            let s = s.clone();
            Box::pin(async move { screenshot::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "get_text",
        "Get the text content of an element identified by a CSS selector.",
        move |input: get_text::GetTextInput| {
            let s = s.clone();
            Box::pin(async move { get_text::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "get_url",
        "Get the current page's URL.",
        move |input: inspect::GetUrlInput| {
            let s = s.clone();
            Box::pin(async move { inspect::get_url(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "get_title",
        "Get the current page's title.",
        move |input: inspect::GetTitleInput| {
            let s = s.clone();
            Box::pin(async move { inspect::get_title(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "get_dom",
        "Get the current page's DOM as HTML.",
        move |input: inspect::GetDomInput| {
            let s = s.clone();
            Box::pin(async move { inspect::get_dom(&s, input).await })
        },
    ))?;

    // --- Utility ---

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "wait_for",
        "Wait for a CSS selector to appear on the page.",
        move |input: wait::WaitForInput| {
            let s = s.clone();
            Box::pin(async move { wait::execute(&s, input).await })
        },
    ))?;

    let s = session.clone();
    registry.register(ToolDescriptor::new(
        "evaluate_script",
        "Execute JavaScript in the page context. Returns the result of the expression.",
        move |input: evaluate_script::EvaluateScriptInput| {
            let s = s.clone();
            Box::pin(async move { evaluate_script::execute(&s, input).await })
        },
    ))?;

    let s = session;
    registry.register(ToolDescriptor::new(
        "close_browser",
        "Close the browser session. The session stays closed for the rest of the process.",
        move |input: close::CloseInput| {
            let s = s.clone();
            Box::pin(async move { close::execute(&s, input).await })
        },
    ))?;

    Ok(())
}
