//! Shared utility functions for tree walking

use std::path::{Component, Path, PathBuf};

use crate::error::{FilistError, Result};

/// Make a root argument absolute and lexically clean.
///
/// Symlinks are not resolved; `.` components are dropped and `..` removes
/// the preceding component.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| FilistError::ResolveRoot {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean_path(&absolute))
}

/// Lexically normalize a path without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
