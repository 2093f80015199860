//! Filist - list the files under directory trees with selectable columns

pub mod cli;
pub mod column;
pub mod error;
pub mod hash;
pub mod logging;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use column::{ColumnKind, EntryInfo};
pub use error::{FilistError, Result};
pub use hash::{HashAlgorithm, hash_file};
pub use output::{JsonLinesFormatter, OutputFormat, TabFormatter};
pub use tree::{EntryOutput, TreeWalker, WalkSummary, WalkerConfig};
