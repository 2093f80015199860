//! Directory tree walking logic
//!
//! `TreeWalker` visits every entry below each root depth-first, applies the
//! directory/file/depth policy from `WalkerConfig`, and streams one row of
//! column values per qualifying entry to an `EntryOutput`.

mod config;
mod utils;
mod walker;

// Re-export public types
pub use config::WalkerConfig;
pub use utils::{clean_path, resolve_root};
pub use walker::{EntryOutput, TreeWalker, WalkSummary};
