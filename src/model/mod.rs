//! Session model - the complete state of one editing session
//!
//! This module contains all the state types following the Elm Architecture pattern.
//! Nothing here outlives the session; the document itself is owned by the host.

pub mod history;
pub mod match_set;
pub mod selection;

pub use history::{ChangeBatch, ChangeKind, ChangeRecord, UndoLog};
pub use match_set::MatchSet;
pub use selection::{
    aggregate_selection, find_top_level_frame, FrameInfo, SelectionView, TextGroup, TextGroups,
    TextNodeInfo, NO_FRAME_KEY,
};

use crate::config::PluginConfig;

/// The complete session model
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Result of the last search and the cursor into it
    pub matches: MatchSet,
    /// Last change batch, kept for a single undo
    pub undo: UndoLog,
    /// Loaded plugin configuration
    pub config: PluginConfig,
}

impl SessionState {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            matches: MatchSet::new(),
            undo: UndoLog::new(),
            config,
        }
    }
}
