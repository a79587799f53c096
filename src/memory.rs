//! In-memory host document
//!
//! A self-contained implementation of the host traits, used by the command
//! line runner and by tests. Documents load from and save to JSON.

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::host::{Document, FontLoader, FontName, FontSpec, NodeId, NodeKind, NodeRef, NodeTree};

/// Font given to text nodes created without one
pub fn default_font() -> FontName {
    FontName::new("Inter", "Regular")
}

/// Serialized form of a node and its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<FontName>,
    /// One font per character, for text with mixed styling
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<FontName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeData>,
}

/// Serialized form of a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    pub pages: Vec<NodeData>,
    #[serde(default)]
    pub selection: Vec<NodeId>,
    /// Fonts whose loads fail
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable_fonts: Vec<FontName>,
    /// Reject text writes while a font of the node is not loaded
    #[serde(default)]
    pub strict_fonts: bool,
}

#[derive(Debug, Clone)]
enum Fonts {
    Uniform(FontName),
    PerChar(Vec<FontName>),
}

impl Fonts {
    fn distinct(&self) -> Vec<&FontName> {
        match self {
            Fonts::Uniform(font) => vec![font],
            Fonts::PerChar(fonts) => {
                let mut seen = Vec::new();
                for font in fonts {
                    if !seen.contains(&font) {
                        seen.push(font);
                    }
                }
                seen
            }
        }
    }

    fn first(&self) -> FontName {
        match self {
            Fonts::Uniform(font) => font.clone(),
            Fonts::PerChar(fonts) => fonts.first().cloned().unwrap_or_else(default_font),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    characters: Option<String>,
    fonts: Fonts,
}

/// Host document held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: HashMap<NodeId, Node>,
    pages: Vec<NodeId>,
    current_page: usize,
    selection: Vec<NodeId>,
    unavailable_fonts: HashSet<FontName>,
    strict_fonts: bool,
    loaded_fonts: RefCell<Vec<FontName>>,
    load_attempts: RefCell<usize>,
}

impl MemoryDocument {
    /// Empty document with a single page `0:1`
    pub fn new() -> Self {
        let mut doc = Self::default();
        doc.add_page("0:1", "Page 1");
        doc
    }

    pub fn from_data(data: DocumentData) -> anyhow::Result<Self> {
        let mut doc = Self {
            unavailable_fonts: data.unavailable_fonts.into_iter().collect(),
            strict_fonts: data.strict_fonts,
            ..Self::default()
        };
        for page in data.pages {
            if page.kind != NodeKind::Page {
                bail!("top-level node {} is not a page", page.id);
            }
            doc.pages.push(page.id.clone());
            doc.insert_tree(None, page)?;
        }
        if doc.pages.is_empty() {
            bail!("document has no pages");
        }
        for id in &data.selection {
            if !doc.nodes.contains_key(id) {
                bail!("selected node {} does not exist", id);
            }
        }
        doc.selection = data.selection;
        Ok(doc)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let data: DocumentData = serde_json::from_str(json).context("Invalid document JSON")?;
        Self::from_data(data)
    }

    pub fn to_data(&self) -> DocumentData {
        DocumentData {
            pages: self.pages.iter().filter_map(|id| self.node_data(id)).collect(),
            selection: self.selection.clone(),
            unavailable_fonts: self.unavailable_fonts.iter().cloned().collect(),
            strict_fonts: self.strict_fonts,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_data())?)
    }

    fn insert_tree(&mut self, parent: Option<NodeId>, data: NodeData) -> anyhow::Result<()> {
        if self.nodes.contains_key(&data.id) {
            bail!("duplicate node id {}", data.id);
        }
        let fonts = match (data.fonts.is_empty(), data.font_name) {
            (false, _) => Fonts::PerChar(data.fonts),
            (true, Some(font)) => Fonts::Uniform(font),
            (true, None) => Fonts::Uniform(default_font()),
        };
        let characters = match data.kind {
            NodeKind::Text => Some(data.characters.unwrap_or_default()),
            _ => None,
        };
        self.nodes.insert(
            data.id.clone(),
            Node {
                kind: data.kind,
                name: data.name,
                parent: parent.clone(),
                children: Vec::new(),
                characters,
                fonts,
            },
        );
        if let Some(parent) = &parent {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.push(data.id.clone());
            }
        }
        for child in data.children {
            self.insert_tree(Some(data.id.clone()), child)?;
        }
        Ok(())
    }

    fn node_data(&self, id: &NodeId) -> Option<NodeData> {
        let node = self.nodes.get(id)?;
        let (font_name, fonts) = match (&node.kind, &node.fonts) {
            (NodeKind::Text, Fonts::Uniform(font)) => (Some(font.clone()), Vec::new()),
            (NodeKind::Text, Fonts::PerChar(fonts)) => (None, fonts.clone()),
            _ => (None, Vec::new()),
        };
        Some(NodeData {
            id: id.clone(),
            kind: node.kind,
            name: node.name.clone(),
            characters: node.characters.clone(),
            font_name,
            fonts,
            children: node
                .children
                .iter()
                .filter_map(|child| self.node_data(child))
                .collect(),
        })
    }

    fn insert(&mut self, parent: Option<&NodeId>, id: NodeId, node: Node) {
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.push(id.clone());
            }
        }
        self.nodes.insert(id, node);
    }

    fn new_node(kind: NodeKind, name: &str, parent: Option<&NodeId>) -> Node {
        Node {
            kind,
            name: name.to_string(),
            parent: parent.cloned(),
            children: Vec::new(),
            characters: None,
            fonts: Fonts::Uniform(default_font()),
        }
    }

    /// Add a page; the first page added is the current one
    pub fn add_page(&mut self, id: &str, name: &str) -> NodeId {
        let id = NodeId::new(id);
        self.insert(None, id.clone(), Self::new_node(NodeKind::Page, name, None));
        self.pages.push(id.clone());
        id
    }

    pub fn add_frame(&mut self, parent: &NodeId, id: &str, name: &str) -> NodeId {
        let id = NodeId::new(id);
        let node = Self::new_node(NodeKind::Frame, name, Some(parent));
        self.insert(Some(parent), id.clone(), node);
        id
    }

    pub fn add_group(&mut self, parent: &NodeId, id: &str, name: &str) -> NodeId {
        let id = NodeId::new(id);
        let node = Self::new_node(NodeKind::Group, name, Some(parent));
        self.insert(Some(parent), id.clone(), node);
        id
    }

    pub fn add_text(&mut self, parent: &NodeId, id: &str, text: &str) -> NodeId {
        self.add_text_with_font(parent, id, text, default_font())
    }

    pub fn add_text_with_font(
        &mut self,
        parent: &NodeId,
        id: &str,
        text: &str,
        font: FontName,
    ) -> NodeId {
        let id = NodeId::new(id);
        let mut node = Self::new_node(NodeKind::Text, text, Some(parent));
        node.characters = Some(text.to_string());
        node.fonts = Fonts::Uniform(font);
        self.insert(Some(parent), id.clone(), node);
        id
    }

    /// Text node with one font per character
    pub fn add_mixed_text(
        &mut self,
        parent: &NodeId,
        id: &str,
        text: &str,
        fonts: Vec<FontName>,
    ) -> NodeId {
        let id = NodeId::new(id);
        let mut node = Self::new_node(NodeKind::Text, text, Some(parent));
        node.characters = Some(text.to_string());
        node.fonts = Fonts::PerChar(fonts);
        self.insert(Some(parent), id.clone(), node);
        id
    }

    /// Delete a node and its subtree
    pub fn remove(&mut self, id: &NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if let Some(parent) = node.parent.as_ref().and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|child| child != id);
        }
        self.selection.retain(|sel| sel != id);
        for child in node.children {
            self.remove(&child);
        }
    }

    /// Change the type of a node in place
    pub fn retype(&mut self, id: &NodeId, kind: NodeKind) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.kind = kind;
            if kind != NodeKind::Text {
                node.characters = None;
            }
        }
    }

    pub fn set_current_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current_page = index;
        }
    }

    pub fn mark_font_unavailable(&mut self, font: FontName) {
        self.unavailable_fonts.insert(font);
    }

    pub fn set_strict_fonts(&mut self, strict: bool) {
        self.strict_fonts = strict;
    }

    /// Fonts successfully loaded so far, in load order
    pub fn loaded_fonts(&self) -> Vec<FontName> {
        self.loaded_fonts.borrow().clone()
    }

    /// Number of font loads requested, failed ones included
    pub fn font_load_attempts(&self) -> usize {
        *self.load_attempts.borrow()
    }

    fn is_loaded(&self, font: &FontName) -> bool {
        self.loaded_fonts.borrow().contains(font)
    }

    fn walk(
        &self,
        id: &NodeId,
        predicate: &mut dyn FnMut(NodeRef<'_>) -> bool,
        out: &mut Vec<NodeId>,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        for child in &node.children {
            if let Some(child_node) = self.nodes.get(child) {
                let view = NodeRef {
                    id: child,
                    kind: child_node.kind,
                    characters: child_node.characters.as_deref(),
                };
                if predicate(view) {
                    out.push(child.clone());
                }
            }
            self.walk(child, predicate, out);
        }
    }
}

impl NodeTree for MemoryDocument {
    fn kind(&self, id: &NodeId) -> Option<NodeKind> {
        self.nodes.get(id).map(|node| node.kind)
    }

    fn parent(&self, id: &NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent.clone())
    }
}

impl Document for MemoryDocument {
    fn find_all(&self, predicate: &mut dyn FnMut(NodeRef<'_>) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        if let Some(page) = self.pages.get(self.current_page) {
            self.walk(page, predicate, &mut found);
        }
        found
    }

    async fn resolve(&self, id: &NodeId) -> Option<NodeKind> {
        self.kind(id)
    }

    fn characters(&self, id: &NodeId) -> Option<String> {
        self.nodes.get(id).and_then(|node| node.characters.clone())
    }

    fn set_characters(&mut self, id: &NodeId, text: &str) -> anyhow::Result<()> {
        let strict = self.strict_fonts;
        let missing = match self.nodes.get(id) {
            Some(node) if node.kind == NodeKind::Text => node
                .fonts
                .distinct()
                .into_iter()
                .find(|font| strict && !self.is_loaded(font))
                .cloned(),
            Some(_) => bail!("node {} is not a text node", id),
            None => bail!("node {} does not exist", id),
        };
        if let Some(font) = missing {
            bail!("cannot write text of {}: font {} is not loaded", id, font);
        }
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| anyhow!("node {} does not exist", id))?;
        // New content takes the font of the first character
        node.fonts = Fonts::Uniform(node.fonts.first());
        node.characters = Some(text.to_string());
        Ok(())
    }

    fn name(&self, id: &NodeId) -> Option<String> {
        self.nodes.get(id).map(|node| node.name.clone())
    }

    fn set_name(&mut self, id: &NodeId, name: &str) -> anyhow::Result<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| anyhow!("node {} does not exist", id))?;
        node.name = name.to_string();
        Ok(())
    }

    fn font_name(&self, id: &NodeId) -> Option<FontSpec> {
        let node = self.nodes.get(id).filter(|n| n.kind == NodeKind::Text)?;
        match &node.fonts {
            Fonts::Uniform(font) => Some(FontSpec::Uniform(font.clone())),
            Fonts::PerChar(_) => match node.fonts.distinct().as_slice() {
                [] => Some(FontSpec::Uniform(default_font())),
                [only] => Some(FontSpec::Uniform((*only).clone())),
                _ => Some(FontSpec::Mixed),
            },
        }
    }

    fn range_font_name(&self, id: &NodeId, start: usize, end: usize) -> anyhow::Result<FontName> {
        let node = self
            .nodes
            .get(id)
            .filter(|n| n.kind == NodeKind::Text)
            .ok_or_else(|| anyhow!("node {} is not a text node", id))?;
        let len = node.characters.as_deref().map_or(0, |t| t.chars().count());
        if start >= end || end > len {
            bail!("range {}..{} out of bounds for {} characters", start, end, len);
        }
        match &node.fonts {
            Fonts::Uniform(font) => Ok(font.clone()),
            Fonts::PerChar(fonts) => {
                let range = fonts
                    .get(start..end)
                    .ok_or_else(|| anyhow!("no font data for range {}..{}", start, end))?;
                match range.split_first() {
                    Some((first, rest)) if rest.iter().all(|f| f == first) => Ok(first.clone()),
                    _ => bail!("range {}..{} has mixed fonts", start, end),
                }
            }
        }
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn set_selection(&mut self, ids: Vec<NodeId>) {
        self.selection = ids
            .into_iter()
            .filter(|id| self.nodes.contains_key(id))
            .collect();
    }
}

impl FontLoader for MemoryDocument {
    async fn load_font(&self, font: &FontName) -> anyhow::Result<()> {
        *self.load_attempts.borrow_mut() += 1;
        if self.unavailable_fonts.contains(font) {
            bail!("font {} is not available", font);
        }
        let mut loaded = self.loaded_fonts.borrow_mut();
        if !loaded.contains(font) {
            loaded.push(font.clone());
        }
        Ok(())
    }
}
