//! One-step change history
//!
//! Every mutating operation records the prior value of each node it touches.
//! Only the latest batch is kept; recording a new one discards the old.

use crate::host::NodeId;

/// Which field of a node a record restores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Text content of a text node
    Text,
    /// Name of a frame
    FrameName,
}

/// Prior value of one node field, captured immediately before mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub node_id: NodeId,
    pub original: String,
    pub kind: ChangeKind,
}

impl ChangeRecord {
    pub fn text(node_id: NodeId, original: String) -> Self {
        Self {
            node_id,
            original,
            kind: ChangeKind::Text,
        }
    }

    pub fn frame_name(node_id: NodeId, original: String) -> Self {
        Self {
            node_id,
            original,
            kind: ChangeKind::FrameName,
        }
    }
}

/// Records produced by a single user operation, in the order they were taken
pub type ChangeBatch = Vec<ChangeRecord>;

/// Holds at most one pending change batch
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    pending: ChangeBatch,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was pending with `batch`
    pub fn record(&mut self, batch: ChangeBatch) {
        self.pending = batch;
    }

    /// Take the pending batch, leaving the log empty
    pub fn take(&mut self) -> ChangeBatch {
        std::mem::take(&mut self.pending)
    }

    pub fn can_undo(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> &[ChangeRecord] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_replaces_previous_batch() {
        let mut log = UndoLog::new();
        log.record(vec![ChangeRecord::text(NodeId::new("1"), "a".into())]);
        log.record(vec![
            ChangeRecord::frame_name(NodeId::new("2"), "Card".into()),
            ChangeRecord::frame_name(NodeId::new("3"), "Hero".into()),
        ]);
        assert_eq!(log.pending().len(), 2);
        assert_eq!(log.pending()[0].kind, ChangeKind::FrameName);
    }

    #[test]
    fn test_take_empties_log() {
        let mut log = UndoLog::new();
        assert!(!log.can_undo());
        log.record(vec![ChangeRecord::text(NodeId::new("1"), "a".into())]);
        assert!(log.can_undo());

        let batch = log.take();
        assert_eq!(batch.len(), 1);
        assert!(!log.can_undo());
        assert!(log.take().is_empty());
    }
}
