//! bulktext - find, replace and bulk-edit engine for design documents
//!
//! The engine follows the Elm Architecture: panel and host messages go
//! through `update`, which mutates the session and the document and returns
//! a `Cmd` describing what to post back to the panel.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod fonts;
pub mod host;
pub mod memory;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PluginConfig;
pub use messages::Msg;
pub use model::SessionState;
pub use update::update;
