//! Integration tests against a real headless browser.
//!
//! These launch a Chromium/Chrome binary over CDP and are `#[ignore]` by
//! default because they need one installed.
//!
//! Run with:
//!   cargo test -p mcp-webpilot-core --test live_browser -- --ignored

use mcp_webpilot_core::cdp::CdpDriver;
use mcp_webpilot_core::driver::SessionConfig;
use mcp_webpilot_core::session::Session;
use std::sync::Arc;

fn live_session() -> Arc<Session> {
    Arc::new(Session::new(
        Arc::new(CdpDriver::new()),
        SessionConfig::default(),
    ))
}

/// Serve a small page over a data: URL so the tests stay network-free.
fn data_url(html: &str) -> String {
    format!("data:text/html,{}", html.replace('#', "%23"))
}

// ---------------------------------------------------------------------------
// Navigation and inspection
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore]
async fn test_navigate_and_read_title() {
    let session = live_session();

    session
        .navigate(&data_url("<title>Live Test</title><h1>hello</h1>"))
        .await
        .expect("navigate");

    let title = session.current_title().await.expect("title");
    assert_eq!(title, "Live Test");

    let text = session.read_text("h1").await.expect("read_text");
    assert_eq!(text, "hello");

    session.close().await;
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore]
async fn test_snapshot_sees_labeled_button() {
    let session = live_session();

    session
        .navigate(&data_url(
            r#"<button id="test-button">Press</button><div>decoration</div>"#,
        ))
        .await
        .expect("navigate");

    let snapshot = session.capture_snapshot().await.expect("snapshot");

    assert!(!snapshot.elements.is_empty());
    let button = snapshot
        .elements
        .iter()
        .find(|e| e.id == "test-button")
        .expect("button present in snapshot");
    assert_eq!(button.tag, "button");
    assert_eq!(button.label, "Press");

    session.close().await;
}

// ---------------------------------------------------------------------------
// Form round-trip
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore]
async fn test_fill_fields_round_trip() {
    let session = live_session();

    session
        .navigate(&data_url(r#"<input id="a"><input id="b">"#))
        .await
        .expect("navigate");

    session
        .fill_fields(&[
            ("#a".to_string(), "x".to_string()),
            ("#b".to_string(), "y".to_string()),
        ])
        .await
        .expect("fill");

    let a = session
        .run_script("document.querySelector('#a').value")
        .await
        .expect("eval");
    let b = session
        .run_script("document.querySelector('#b').value")
        .await
        .expect("eval");

    assert_eq!(a, serde_json::json!("x"));
    assert_eq!(b, serde_json::json!("y"));

    session.close().await;
}

// ---------------------------------------------------------------------------
// Screenshot
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore]
async fn test_screenshot_produces_png() {
    let session = live_session();

    session
        .navigate(&data_url("<h1>shot</h1>"))
        .await
        .expect("navigate");

    let png = session
        .capture_screenshot(None, false)
        .await
        .expect("screenshot");

    // PNG magic bytes
    assert_eq!(&png[..4], &[0x89, 0x50, 0x4E, 0x47]);

    session.close().await;
}
