//! End-to-end sessions through the line-oriented runner

mod common;

use bulktext::config::PluginConfig;
use bulktext::memory::MemoryDocument;
use bulktext::runtime::App;
use serde_json::{json, Value};

const CARD: &str = r#"{
    "pages": [{
        "id": "0:1", "type": "PAGE", "name": "Page 1",
        "children": [
            {"id": "1:1", "type": "FRAME", "name": "Card", "children": [
                {"id": "1:2", "type": "TEXT", "characters": "Hello World"},
                {"id": "1:3", "type": "TEXT", "characters": "Hello There"}
            ]},
            {"id": "1:4", "type": "TEXT", "characters": "Loose"}
        ]
    }],
    "selection": ["1:2", "1:4"]
}"#;

fn session(input: &str) -> (Vec<Value>, MemoryDocument) {
    let doc = MemoryDocument::from_json(CARD).unwrap();
    let mut app = App::new(doc, PluginConfig::default(), Vec::new());
    app.start().unwrap();
    app.run(input.as_bytes()).unwrap();
    let out = String::from_utf8(app.output().clone()).unwrap();
    let messages = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (messages, app.into_document())
}

fn types(messages: &[Value]) -> Vec<&str> {
    messages
        .iter()
        .map(|m| m["type"].as_str().unwrap())
        .collect()
}

#[test]
fn test_initial_selection_is_posted() {
    let (out, _) = session("");

    assert_eq!(out.len(), 1);
    assert_eq!(
        out[0],
        json!({
            "type": "selectionChange",
            "textData": {
                "1:1": {
                    "frameName": "Card",
                    "textNodes": [{"nodeId": "1:2", "characters": "Hello World"}]
                },
                "__NO_FRAME__": {
                    "frameName": "Page (no frame)",
                    "textNodes": [{"nodeId": "1:4", "characters": "Loose"}]
                }
            },
            "frameData": []
        })
    );
}

#[test]
fn test_find_replace_undo_session() {
    let input = [
        r#"{"type":"find-text","query":"Hello","isCaseSensitive":false}"#,
        r#"{"type":"replace-all","findText":"Hello","replaceText":"Hi","isCaseSensitive":false}"#,
        r#"{"type":"undo-last-change"}"#,
        r#"{"type":"undo-last-change"}"#,
    ]
    .join("\n");

    let (out, doc) = session(&input);

    assert_eq!(
        types(&out),
        vec![
            "selectionChange",
            "navigation-update",
            "replace-success",
            "selectionChange",
            "undo-complete",
            "hide-undo",
        ]
    );
    assert_eq!(out[1]["count"], 2);
    assert_eq!(out[2], json!({"type": "replace-success", "count": 2, "allReplaced": true}));
    assert_eq!(common::text(&doc, "1:2"), "Hello World");
    assert_eq!(common::text(&doc, "1:3"), "Hello There");
}

#[test]
fn test_host_select_event_posts_selection() {
    let (out, _) = session(r#"{"type":"select","nodeIds":["1:1"]}"#);

    assert_eq!(types(&out), vec!["selectionChange", "selectionChange"]);
    assert_eq!(out[1]["frameData"], json!([{"nodeId": "1:1", "name": "Card"}]));
    assert_eq!(out[1]["textData"], json!({}));
}

#[test]
fn test_bulk_edit_session_writes_document() {
    let input = r#"{"type":"apply-changes","data":[{"nodeId":"1:4","newText":"Tight"}]}"#;

    let (out, doc) = session(input);

    assert_eq!(types(&out), vec!["selectionChange", "selectionChange", "apply-success"]);
    assert_eq!(out[1]["textData"]["__NO_FRAME__"]["textNodes"][0]["characters"], "Tight");
    assert_eq!(out[2]["count"], 1);

    let saved: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    let loose = &saved["pages"][0]["children"][1];
    assert_eq!(loose["characters"], "Tight");
}

#[test]
fn test_unknown_request_reports_error_and_session_continues() {
    let input = [
        r#"{"type":"explode"}"#,
        r#"{"type":"find-text","query":"there"}"#,
    ]
    .join("\n");

    let (out, _) = session(&input);

    assert_eq!(
        types(&out),
        vec!["selectionChange", "plugin-error", "navigation-update"]
    );
    assert_eq!(out[2]["nodeText"], "Hello There");
}

#[test]
fn test_cancel_ends_session() {
    let input = [
        r#"{"type":"cancel"}"#,
        r#"{"type":"find-text","query":"hello"}"#,
    ]
    .join("\n");

    let (out, _) = session(&input);

    assert_eq!(types(&out), vec!["selectionChange"]);
}

#[test]
fn test_unwritable_text_in_strict_host() {
    let json = CARD.replace(
        r#""selection": ["1:2", "1:4"]"#,
        r#""selection": [], "strictFonts": true,
           "unavailableFonts": [{"family": "Inter", "style": "Regular"}]"#,
    );
    let doc = MemoryDocument::from_json(&json).unwrap();
    let mut app = App::new(doc, PluginConfig::default(), Vec::new());

    let input = [
        r#"{"type":"find-text","query":"hello"}"#,
        r#"{"type":"replace-single","findText":"Hello","replaceText":"Hi"}"#,
        r#"{"type":"replace-all","findText":"Hello","replaceText":"Hi"}"#,
        r#"{"type":"find-text","query":"hello"}"#,
    ]
    .join("\n");
    app.run(input.as_bytes()).unwrap();

    let out: Vec<Value> = String::from_utf8(app.output().clone())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        types(&out),
        vec![
            "navigation-update",
            "plugin-error",
            "replace-success",
            "navigation-update",
        ]
    );
    assert!(out[1]["message"].as_str().unwrap().contains("not loaded"));
    // Every node refused the write, so nothing was replaced
    assert_eq!(out[2]["count"], 0);
    assert_eq!(out[3]["count"], 2);
    assert_eq!(common::text(app.document(), "1:2"), "Hello World");
}
