//! Match set - the ordered result of the last search and the cursor into it

use crate::host::NodeId;
use crate::messages::Direction;

/// Nodes matched by the most recent search.
///
/// Invariant: `cursor` is `Some(i)` with `i < nodes.len()`, or `None` when
/// there is no current match. It is always `None` for an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    nodes: Vec<NodeId>,
    cursor: Option<usize>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set; the cursor lands on the first match, if any
    pub fn replace(&mut self, nodes: Vec<NodeId>) {
        self.cursor = if nodes.is_empty() { None } else { Some(0) };
        self.nodes = nodes;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor in wire form: `-1` when there is no current match
    pub fn index(&self) -> i64 {
        self.cursor.map_or(-1, |i| i as i64)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Node under the cursor
    pub fn current(&self) -> Option<&NodeId> {
        self.cursor.and_then(|i| self.nodes.get(i))
    }

    /// Index the cursor would move to, wrapping in both directions
    pub fn step(&self, direction: Direction) -> Option<usize> {
        let len = self.nodes.len();
        if len == 0 {
            return None;
        }
        let current = self.cursor.unwrap_or(0);
        Some(match direction {
            Direction::Next => (current + 1) % len,
            Direction::Prev => (current + len - 1) % len,
        })
    }

    /// Point the cursor at `index`, clamped into range
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = if self.nodes.is_empty() {
            None
        } else {
            Some(index.min(self.nodes.len() - 1))
        };
    }

    /// Drop nodes failing `keep`, then clamp the cursor to `min(index, len - 1)`
    pub fn retain_and_clamp(&mut self, index: usize, mut keep: impl FnMut(&NodeId) -> bool) {
        self.nodes.retain(|id| keep(id));
        self.set_cursor(index);
    }
}
