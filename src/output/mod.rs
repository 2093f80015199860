//! Entry formatting and display
//!
//! Formatters implement `EntryOutput` and write each row as soon as it is
//! produced, so memory use does not depend on the size of the tree.
//!
//! - `streaming` - tab-separated lines (the default)
//! - `json` - one JSON object per line

mod config;
mod json;
mod streaming;

pub use config::OutputFormat;
pub use json::JsonLinesFormatter;
pub use streaming::TabFormatter;
