//! Configuration types for tree walkers

use crate::column::ColumnKind;

/// Configuration for one listing run.
///
/// Built once before the first root is walked and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Columns to print, in output order.
    pub columns: Vec<ColumnKind>,
    /// Emit a line for each directory entry.
    pub include_dirs: bool,
    /// Suppress lines for non-directory entries.
    pub exclude_files: bool,
    /// Do not descend below this many levels. 0 = unlimited
    pub max_depth: usize,
}

impl WalkerConfig {
    /// Whether a directory at `depth` is as deep as the walk may go.
    pub fn at_max_depth(&self, depth: usize) -> bool {
        self.max_depth != 0 && depth >= self.max_depth
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            columns: vec![ColumnKind::Rel],
            include_dirs: false,
            exclude_files: false,
            max_depth: 0,
        }
    }
}
