//! Test utilities for creating temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when the value is dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// The tree used throughout the docs: `1.txt` (empty) and `a/a.txt`
    /// containing `a`.
    pub fn sample() -> Self {
        let tree = Self::new();
        tree.add_file("1.txt", "");
        tree.add_file("a/a.txt", "a");
        tree
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory, creating parents as needed.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create `width` files in each of `width` directories, `depth` levels
    /// deep. Each file holds `file_size` bytes.
    pub fn populate(&self, depth: usize, width: usize, file_size: usize) {
        fn fill(dir: &Path, depth: usize, width: usize, contents: &[u8]) {
            for i in 0..width {
                fs::write(dir.join(format!("file{}.dat", i)), contents)
                    .expect("Failed to write file");
            }
            if depth == 0 {
                return;
            }
            for i in 0..width {
                let sub = dir.join(format!("dir{}", i));
                fs::create_dir_all(&sub).expect("Failed to create dir");
                fill(&sub, depth - 1, width, contents);
            }
        }

        let contents: Vec<u8> = (0..file_size).map(|i| (i % 251) as u8).collect();
        fill(self.dir.path(), depth, width, &contents);
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_tree_layout() {
        let tree = TestTree::sample();
        assert!(tree.path().join("1.txt").is_file());
        assert_eq!(fs::read(tree.path().join("a").join("a.txt")).unwrap(), b"a");
    }

    #[test]
    fn test_populate_counts() {
        let tree = TestTree::new();
        tree.populate(1, 2, 4);
        // 2 top-level files + 2 dirs with 2 files each
        let files = walkdir::WalkDir::new(tree.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .count();
        assert_eq!(files, 6);
    }
}
