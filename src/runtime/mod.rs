//! Runtime module - plays the host side of a session
//!
//! - `app` - drives `update` against an in-memory document and performs commands
//! - `input` - maps incoming JSON lines to messages

pub mod app;
pub mod input;

pub use app::App;
pub use input::{parse_input, HostEvent, Input};
