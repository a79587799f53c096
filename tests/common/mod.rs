//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use bulktext::host::{FontName, NodeId};
use bulktext::memory::MemoryDocument;
use bulktext::messages::{Msg, PanelMsg, UiMessage};
use bulktext::{Cmd, SessionState};

/// Page `0:1` holding frame `1:1` "Card" with two text nodes:
/// `1:2` "Hello World" and `1:3` "Hello There".
pub fn card_document() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let page = NodeId::new("0:1");
    let frame = doc.add_frame(&page, "1:1", "Card");
    doc.add_text(&frame, "1:2", "Hello World");
    doc.add_text(&frame, "1:3", "Hello There");
    doc
}

/// Frame `1:1` holding `1:2` "Hello broken" in a font that never loads,
/// followed by `1:3` "Hello World" and `1:4` "Hello There"
pub fn broken_font_document() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let frame = doc.add_frame(&NodeId::new("0:1"), "1:1", "Card");
    let missing = FontName::new("Missing", "Regular");
    doc.add_text_with_font(&frame, "1:2", "Hello broken", missing.clone());
    doc.add_text(&frame, "1:3", "Hello World");
    doc.add_text(&frame, "1:4", "Hello There");
    doc.mark_font_unavailable(missing);
    doc
}

pub fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

/// Run one message through `update`
pub fn run(model: &mut SessionState, doc: &mut MemoryDocument, msg: impl Into<Msg>) -> Cmd {
    pollster::block_on(bulktext::update(model, doc, msg.into()))
}

/// Messages posted by `cmd`, in order, owned
pub fn posted(cmd: &Cmd) -> Vec<UiMessage> {
    cmd.messages().into_iter().cloned().collect()
}

/// The last message posted by `cmd`
pub fn last_posted(cmd: &Cmd) -> UiMessage {
    posted(cmd)
        .pop()
        .unwrap_or_else(|| panic!("no message posted by {:?}", cmd))
}

/// Toast texts raised by `cmd`
pub fn notifications(cmd: &Cmd) -> Vec<String> {
    cmd.clone()
        .into_vec()
        .into_iter()
        .filter_map(|c| match c {
            Cmd::Notify(text) => Some(text),
            _ => None,
        })
        .collect()
}

pub fn find(query: &str, case_sensitive: bool) -> PanelMsg {
    PanelMsg::FindText {
        query: query.to_string(),
        is_case_sensitive: case_sensitive,
    }
}

pub fn replace_single(find: &str, replace: &str, case_sensitive: bool) -> PanelMsg {
    PanelMsg::ReplaceSingle {
        find_text: find.to_string(),
        replace_text: replace.to_string(),
        is_case_sensitive: case_sensitive,
    }
}

pub fn replace_all(find: &str, replace: &str, case_sensitive: bool) -> PanelMsg {
    PanelMsg::ReplaceAll {
        find_text: find.to_string(),
        replace_text: replace.to_string(),
        is_case_sensitive: case_sensitive,
    }
}

pub fn text(doc: &MemoryDocument, node: &str) -> String {
    use bulktext::host::Document;
    doc.characters(&id(node)).unwrap_or_default()
}
