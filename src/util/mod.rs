//! Utility modules

pub mod text;

pub use text::{escape_for_pattern, literal_regex, substitute};
