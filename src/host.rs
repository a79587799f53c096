//! Host document interface
//!
//! The node tree, its selection and the font subsystem belong to the host.
//! The engine only holds [`NodeId`]s and reaches the tree through these traits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a node in the host document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Node type as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Document,
    Page,
    Frame,
    Group,
    Text,
    #[serde(other)]
    Other,
}

/// A font family/style pair, the unit the font subsystem loads
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family, self.style)
    }
}

/// Font of a whole text node: one font, or different fonts across ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSpec {
    Uniform(FontName),
    Mixed,
}

/// Borrowed view of a node handed to [`Document::find_all`] predicates
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub id: &'a NodeId,
    pub kind: NodeKind,
    /// Text content, present only for text nodes
    pub characters: Option<&'a str>,
}

/// Minimal tree capability: identity, type and parent link.
///
/// Enough to walk an ownership chain without the rest of the document API.
pub trait NodeTree {
    /// Type of a node, `None` if it no longer exists
    fn kind(&self, id: &NodeId) -> Option<NodeKind>;

    /// Parent of a node, `None` at the root or for a missing node
    fn parent(&self, id: &NodeId) -> Option<NodeId>;
}

/// Read/write access to the live host document.
#[allow(async_fn_in_trait)]
pub trait Document: NodeTree {
    /// Every node on the current page accepted by `predicate`, in tree order
    fn find_all(&self, predicate: &mut dyn FnMut(NodeRef<'_>) -> bool) -> Vec<NodeId>;

    /// Resolve a node id that may have gone stale since it was handed out
    async fn resolve(&self, id: &NodeId) -> Option<NodeKind>;

    fn characters(&self, id: &NodeId) -> Option<String>;

    fn set_characters(&mut self, id: &NodeId, text: &str) -> anyhow::Result<()>;

    fn name(&self, id: &NodeId) -> Option<String>;

    fn set_name(&mut self, id: &NodeId, name: &str) -> anyhow::Result<()>;

    /// Font of a text node, `None` for non-text or missing nodes
    fn font_name(&self, id: &NodeId) -> Option<FontSpec>;

    /// Font of the character range `start..end` of a text node
    fn range_font_name(&self, id: &NodeId, start: usize, end: usize) -> anyhow::Result<FontName>;

    fn selection(&self) -> Vec<NodeId>;

    fn set_selection(&mut self, ids: Vec<NodeId>);
}

/// Font subsystem. A font must be loaded before text using it is written.
#[allow(async_fn_in_trait)]
pub trait FontLoader {
    async fn load_font(&self, font: &FontName) -> anyhow::Result<()>;
}
