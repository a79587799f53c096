//! Message types for the Elm-style architecture
//!
//! Requests arrive from the panel or from the host; every state change flows
//! through [`crate::update::update`]. Replies to the panel are [`UiMessage`]s,
//! delivered through [`crate::commands::Cmd::PostMessage`].

use serde::{Deserialize, Serialize};

use crate::host::NodeId;
use crate::model::{FrameInfo, TextGroups};

/// Direction for stepping through search matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// One entry of a bulk text edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChange {
    pub node_id: NodeId,
    pub new_text: String,
}

/// One entry of a bulk frame rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNameChange {
    pub node_id: NodeId,
    pub new_name: String,
}

/// Requests sent by the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PanelMsg {
    /// Search all text nodes for a literal query
    FindText {
        #[serde(default)]
        query: String,
        #[serde(default)]
        is_case_sensitive: bool,
    },
    /// Step to the next/previous match
    Navigate { direction: Direction },
    /// Replace the first occurrence inside the current match
    ReplaceSingle {
        #[serde(default)]
        find_text: String,
        #[serde(default)]
        replace_text: String,
        #[serde(default)]
        is_case_sensitive: bool,
    },
    /// Replace every occurrence in every text node of the page
    ReplaceAll {
        #[serde(default)]
        find_text: String,
        #[serde(default)]
        replace_text: String,
        #[serde(default)]
        is_case_sensitive: bool,
    },
    /// Bulk text edit by node id
    ApplyChanges {
        #[serde(default)]
        data: Vec<TextChange>,
    },
    /// Bulk frame rename by node id
    ApplyFrameNameChanges {
        #[serde(default)]
        data: Vec<FrameNameChange>,
    },
    /// Restore the last change batch
    UndoLastChange,
    /// End the session
    Cancel,
}

/// Notifications raised by the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMsg {
    /// The active selection changed
    SelectionChanged,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Panel(PanelMsg),
    Host(HostMsg),
}

impl From<PanelMsg> for Msg {
    fn from(msg: PanelMsg) -> Self {
        Msg::Panel(msg)
    }
}

impl From<HostMsg> for Msg {
    fn from(msg: HostMsg) -> Self {
        Msg::Host(msg)
    }
}

/// The current match after a single replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedNode {
    pub index: usize,
    pub count: usize,
    pub node_text: String,
}

/// Messages posted back to the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum UiMessage {
    /// Selected text grouped by outer frame, plus selected frames
    #[serde(rename = "selectionChange")]
    SelectionChange {
        text_data: TextGroups,
        frame_data: Vec<FrameInfo>,
    },
    /// Result of a search with no current match (`index` is -1)
    SearchResult { count: usize, index: i64 },
    /// The cursor moved to a match
    NavigationUpdate {
        index: usize,
        count: usize,
        node_text: String,
    },
    ReplaceSuccess {
        count: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        updated_node: Option<UpdatedNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        all_replaced: Option<bool>,
    },
    ApplySuccess { count: usize },
    UndoComplete,
    /// Undo was requested with nothing pending
    HideUndo,
    PluginError { message: String },
}

impl UiMessage {
    /// The zero-result search reply
    pub fn no_results() -> Self {
        UiMessage::SearchResult {
            count: 0,
            index: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_find_text() {
        let msg: PanelMsg =
            serde_json::from_str(r#"{"type":"find-text","query":"Hello","isCaseSensitive":true}"#)
                .unwrap();
        assert_eq!(
            msg,
            PanelMsg::FindText {
                query: "Hello".to_string(),
                is_case_sensitive: true
            }
        );
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let msg: PanelMsg = serde_json::from_str(r#"{"type":"replace-all"}"#).unwrap();
        assert_eq!(
            msg,
            PanelMsg::ReplaceAll {
                find_text: String::new(),
                replace_text: String::new(),
                is_case_sensitive: false
            }
        );
    }

    #[test]
    fn test_parse_apply_frame_name_changes() {
        let msg: PanelMsg = serde_json::from_str(
            r#"{"type":"apply-frame-name-changes","data":[{"nodeId":"1:2","newName":"Hero"}]}"#,
        )
        .unwrap();
        match msg {
            PanelMsg::ApplyFrameNameChanges { data } => {
                assert_eq!(data.len(), 1);
                assert_eq!(data[0].node_id, NodeId::new("1:2"));
                assert_eq!(data[0].new_name, "Hero");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_navigate_and_unit_variants() {
        let nav: PanelMsg =
            serde_json::from_str(r#"{"type":"navigate","direction":"prev"}"#).unwrap();
        assert_eq!(
            nav,
            PanelMsg::Navigate {
                direction: Direction::Prev
            }
        );
        let undo: PanelMsg = serde_json::from_str(r#"{"type":"undo-last-change"}"#).unwrap();
        assert_eq!(undo, PanelMsg::UndoLastChange);
        let cancel: PanelMsg = serde_json::from_str(r#"{"type":"cancel"}"#).unwrap();
        assert_eq!(cancel, PanelMsg::Cancel);
    }

    #[test]
    fn test_serialize_replace_success_omits_empty_fields() {
        let json = serde_json::to_value(UiMessage::ReplaceSuccess {
            count: 0,
            updated_node: None,
            all_replaced: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "replace-success", "count": 0}));
    }

    #[test]
    fn test_serialize_navigation_update() {
        let json = serde_json::to_value(UiMessage::NavigationUpdate {
            index: 1,
            count: 3,
            node_text: "Hi".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "navigation-update", "index": 1, "count": 3, "nodeText": "Hi"})
        );
    }

    #[test]
    fn test_serialize_unit_variants() {
        assert_eq!(
            serde_json::to_value(UiMessage::HideUndo).unwrap(),
            serde_json::json!({"type": "hide-undo"})
        );
        assert_eq!(
            serde_json::to_value(UiMessage::no_results()).unwrap(),
            serde_json::json!({"type": "search-result", "count": 0, "index": -1})
        );
    }
}
