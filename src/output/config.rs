//! Output configuration types

/// How rows are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-separated values, no header
    #[default]
    Tab,
    /// One JSON object per entry, keyed by column name
    JsonLines,
}
