//! Column providers
//!
//! A column turns one visited entry into one cell. Path cells keep the OS
//! bytes of the name, so a non-UTF-8 file name is carried through unchanged.
//! Directory entries get a trailing separator on path columns and an empty
//! cell for every other column, so every row has the same number of cells.

use std::ffi::OsString;
use std::fs::Metadata;
use std::io;
use std::path::{MAIN_SEPARATOR_STR, Path};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::hash::{HashAlgorithm, hash_file};

/// Timestamp layout: microsecond precision with numeric UTC offset.
const MTIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// The kinds of column that can be selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Rel,
    Abs,
    Size,
    Mtime,
    Md5,
    Sha1,
    Sha256,
}

impl ColumnKind {
    /// All kinds, in the order their flags appear in `--help`.
    pub const ALL: [ColumnKind; 7] = [
        ColumnKind::Rel,
        ColumnKind::Abs,
        ColumnKind::Size,
        ColumnKind::Mtime,
        ColumnKind::Md5,
        ColumnKind::Sha1,
        ColumnKind::Sha256,
    ];

    /// Column name; matches the long flag that selects it.
    pub fn name(self) -> &'static str {
        match self {
            ColumnKind::Rel => "rel",
            ColumnKind::Abs => "abs",
            ColumnKind::Size => "size",
            ColumnKind::Mtime => "mtime",
            ColumnKind::Md5 => "md5",
            ColumnKind::Sha1 => "sha1",
            ColumnKind::Sha256 => "sha256",
        }
    }

    /// Whether this column is one of the two path columns.
    pub fn is_path(self) -> bool {
        matches!(self, ColumnKind::Rel | ColumnKind::Abs)
    }

    fn hash_algorithm(self) -> Option<HashAlgorithm> {
        match self {
            ColumnKind::Md5 => Some(HashAlgorithm::Md5),
            ColumnKind::Sha1 => Some(HashAlgorithm::Sha1),
            ColumnKind::Sha256 => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }

    /// Compute this column's value for one entry.
    ///
    /// `base` is the traversal root and `path` the entry's absolute path.
    /// Only the hash columns touch the filesystem.
    pub fn value(self, base: &Path, path: &Path, info: &EntryInfo) -> io::Result<OsString> {
        match self {
            ColumnKind::Rel => {
                let rel = path.strip_prefix(base).map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("{} is not under {}", path.display(), base.display()),
                    )
                })?;
                Ok(with_dir_suffix(rel, info))
            }
            ColumnKind::Abs => Ok(with_dir_suffix(path, info)),
            _ if info.is_dir => Ok(OsString::new()),
            ColumnKind::Size => Ok(info.len.to_string().into()),
            ColumnKind::Mtime => Ok(info.modified.map(format_mtime).unwrap_or_default().into()),
            kind => match kind.hash_algorithm() {
                Some(algorithm) => hash_file(path, algorithm).map(OsString::from),
                None => Ok(OsString::new()),
            },
        }
    }
}

/// Snapshot of the metadata the columns need, taken once per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    pub is_dir: bool,
    pub len: u64,
    /// `None` on platforms without modification times.
    pub modified: Option<SystemTime>,
}

impl EntryInfo {
    pub fn from_metadata(meta: &Metadata) -> Self {
        Self {
            is_dir: meta.is_dir(),
            len: meta.len(),
            modified: meta.modified().ok(),
        }
    }
}

fn with_dir_suffix(path: &Path, info: &EntryInfo) -> OsString {
    let mut value = path.as_os_str().to_os_string();
    if info.is_dir {
        value.push(MAIN_SEPARATOR_STR);
    }
    value
}

/// Format a modification time in the local timezone.
pub fn format_mtime(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(MTIME_FORMAT).to_string()
}
