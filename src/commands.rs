//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that the host performs after an update.

use crate::host::NodeId;
use crate::messages::UiMessage;

/// Side effects requested by [`crate::update::update`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Post a message to the panel
    PostMessage(UiMessage),
    /// Center the viewport on the given nodes
    ScrollIntoView(Vec<NodeId>),
    /// Show a toast notification
    Notify(String),
    /// End the session
    Close,
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn post(msg: UiMessage) -> Self {
        Cmd::PostMessage(msg)
    }

    /// Flatten nested batches into the ordered list of effects
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            cmd => vec![cmd],
        }
    }

    /// Messages this command posts to the panel, in order
    pub fn messages(&self) -> Vec<&UiMessage> {
        match self {
            Cmd::PostMessage(msg) => vec![msg],
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::messages).collect(),
            _ => Vec::new(),
        }
    }

    /// Check if this command ends the session
    pub fn is_close(&self) -> bool {
        match self {
            Cmd::Close => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_close),
            _ => false,
        }
    }
}
