//! Selection view - selected text grouped by its outermost frame

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::host::{Document, NodeId, NodeKind, NodeTree};

/// Key of the group holding text that sits directly on a page
pub const NO_FRAME_KEY: &str = "__NO_FRAME__";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNodeInfo {
    pub node_id: NodeId,
    pub characters: String,
}

/// Selected text nodes sharing one outer frame
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGroup {
    /// Outer frame, `None` for the no-frame bucket
    #[serde(skip)]
    pub frame_id: Option<NodeId>,
    pub frame_name: String,
    pub text_nodes: Vec<TextNodeInfo>,
}

impl TextGroup {
    /// Map key used on the wire
    pub fn key(&self) -> &str {
        self.frame_id.as_ref().map_or(NO_FRAME_KEY, NodeId::as_str)
    }
}

/// Groups in first-seen order; serialized as an object keyed by frame id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextGroups(Vec<TextGroup>);

impl TextGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the group for `frame_id`, creating it on first use
    pub fn push(
        &mut self,
        frame_id: Option<NodeId>,
        frame_name: impl FnOnce() -> String,
        node: TextNodeInfo,
    ) {
        match self.0.iter_mut().find(|g| g.frame_id == frame_id) {
            Some(group) => group.text_nodes.push(node),
            None => self.0.push(TextGroup {
                frame_id,
                frame_name: frame_name(),
                text_nodes: vec![node],
            }),
        }
    }

    /// Group for a frame, or the no-frame bucket when `frame_id` is `None`
    pub fn get(&self, frame_id: Option<&NodeId>) -> Option<&TextGroup> {
        self.0.iter().find(|g| g.frame_id.as_ref() == frame_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextGroup> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TextGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(group.key(), group)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInfo {
    pub node_id: NodeId,
    pub name: String,
}

/// Derived view of the current selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionView {
    pub text_data: TextGroups,
    pub frame_data: Vec<FrameInfo>,
}

/// Outermost frame containing `id` below its page.
///
/// Walks the parent chain up to the first page (or the root), keeping the
/// last frame seen, so nested frames resolve to the top-level one.
pub fn find_top_level_frame<T: NodeTree + ?Sized>(tree: &T, id: &NodeId) -> Option<NodeId> {
    let mut highest = None;
    let mut parent = tree.parent(id);
    while let Some(current) = parent {
        match tree.kind(&current) {
            Some(NodeKind::Page) | None => break,
            Some(NodeKind::Frame) => highest = Some(current.clone()),
            Some(_) => {}
        }
        parent = tree.parent(&current);
    }
    highest
}

/// Build the selection view from the host's current selection
pub fn aggregate_selection<D: Document + ?Sized>(doc: &D, no_frame_label: &str) -> SelectionView {
    let mut view = SelectionView::default();

    for id in doc.selection() {
        match doc.kind(&id) {
            Some(NodeKind::Text) => {
                let frame_id = find_top_level_frame(doc, &id);
                let frame_name = || match &frame_id {
                    Some(frame) => doc.name(frame).unwrap_or_default(),
                    None => no_frame_label.to_string(),
                };
                let node = TextNodeInfo {
                    characters: doc.characters(&id).unwrap_or_default(),
                    node_id: id.clone(),
                };
                view.text_data.push(frame_id.clone(), frame_name, node);
            }
            Some(NodeKind::Frame) => view.frame_data.push(FrameInfo {
                name: doc.name(&id).unwrap_or_default(),
                node_id: id,
            }),
            _ => {}
        }
    }

    view
}
