//! TreeWalker - streams one line per entry without building the tree in memory

use std::ffi::OsString;
use std::io;
use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::column::{ColumnKind, EntryInfo};
use crate::error::{FilistError, Result};

use super::config::WalkerConfig;
use super::utils::resolve_root;

/// Callback for streaming output - receives the column values of one entry.
pub trait EntryOutput {
    /// Write one entry. `values[i]` is the value of `columns[i]`.
    fn output_entry(&mut self, columns: &[ColumnKind], values: &[OsString]) -> io::Result<()>;

    /// Called once after the last root has been walked successfully.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Number of entries emitted by a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub dirs: usize,
    pub files: usize,
}

impl WalkSummary {
    fn add(&mut self, other: WalkSummary) {
        self.dirs += other.dirs;
        self.files += other.files;
    }
}

/// Depth-first, single-threaded walker.
///
/// Siblings are visited in file name order. Symbolic links are listed as
/// non-directory entries and never followed.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk each root in order, then call `output.finish()`.
    ///
    /// The first error aborts the run; lines already written stay written.
    pub fn walk_roots<P, O>(&self, roots: &[P], output: &mut O) -> Result<WalkSummary>
    where
        P: AsRef<Path>,
        O: EntryOutput,
    {
        let mut summary = WalkSummary::default();
        for root in roots {
            summary.add(self.walk_streaming(root.as_ref(), output)?);
        }
        output.finish()?;
        Ok(summary)
    }

    /// Resolve `root` to an absolute path and stream every qualifying entry
    /// below it to `output`.
    pub fn walk_streaming<O: EntryOutput>(&self, root: &Path, output: &mut O) -> Result<WalkSummary> {
        let root = resolve_root(root)?;
        debug!(root = %root.display(), "walking root");

        let mut summary = WalkSummary::default();
        let mut entries = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            let entry = entry?;

            // The root itself is never listed
            if entry.depth() == 0 {
                continue;
            }

            let info = EntryInfo::from_metadata(&entry.metadata()?);

            if info.is_dir {
                if self.config.include_dirs {
                    self.emit(&root, entry.path(), &info, output)?;
                    summary.dirs += 1;
                }
                // Prune after emitting so the directory itself still shows up
                if self.config.at_max_depth(entry.depth()) {
                    trace!(path = %entry.path().display(), depth = entry.depth(), "not descending");
                    entries.skip_current_dir();
                }
            } else if !self.config.exclude_files {
                self.emit(&root, entry.path(), &info, output)?;
                summary.files += 1;
            }
        }

        debug!(
            root = %root.display(),
            dirs = summary.dirs,
            files = summary.files,
            "finished root"
        );
        Ok(summary)
    }

    /// Compute every column for one entry, then hand the whole row to the
    /// output. A failing column means nothing is written for the entry.
    fn emit<O: EntryOutput>(
        &self,
        root: &Path,
        path: &Path,
        info: &EntryInfo,
        output: &mut O,
    ) -> Result<()> {
        let values = self
            .config
            .columns
            .iter()
            .map(|column| {
                column
                    .value(root, path, info)
                    .map_err(|e| FilistError::column(path, e))
            })
            .collect::<Result<Vec<_>>>()?;

        output.output_entry(&self.config.columns, &values)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::MAIN_SEPARATOR;
    use tempfile::TempDir;

    /// Collects rows in memory.
    #[derive(Default)]
    struct Rows {
        rows: Vec<Vec<String>>,
        raw: Vec<Vec<OsString>>,
        finished: bool,
    }

    impl EntryOutput for Rows {
        fn output_entry(&mut self, _columns: &[ColumnKind], values: &[OsString]) -> io::Result<()> {
            self.rows
                .push(values.iter().map(|v| v.to_string_lossy().into_owned()).collect());
            self.raw.push(values.to_vec());
            Ok(())
        }

        fn finish(&mut self) -> io::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    impl Rows {
        fn first_column(&self) -> Vec<String> {
            self.rows.iter().map(|r| r[0].clone()).collect()
        }
    }

    fn sep(path: &str) -> String {
        path.replace('/', &MAIN_SEPARATOR.to_string())
    }

    /// root/
    ///   1.txt      (0 bytes)
    ///   a/a.txt    (1 byte)
    ///   a/b/b.txt  (2 bytes)
    fn sample_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("1.txt"), "").unwrap();
        fs::create_dir_all(dir.path().join("a").join("b")).unwrap();
        fs::write(dir.path().join("a").join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("a").join("b").join("b.txt"), "bb").unwrap();
        dir
    }

    fn walk(dir: &TempDir, config: WalkerConfig) -> Rows {
        let mut rows = Rows::default();
        TreeWalker::new(config)
            .walk_roots(&[dir.path()], &mut rows)
            .unwrap();
        rows
    }

    #[test]
    fn test_default_lists_files_only() {
        let dir = sample_tree();
        let rows = walk(&dir, WalkerConfig::default());
        assert_eq!(
            rows.first_column(),
            vec![sep("1.txt"), sep("a/a.txt"), sep("a/b/b.txt")]
        );
        assert!(rows.finished);
    }

    #[test]
    fn test_include_dirs_parent_before_children() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                include_dirs: true,
                ..Default::default()
            },
        );
        assert_eq!(
            rows.first_column(),
            vec![
                sep("1.txt"),
                sep("a/"),
                sep("a/a.txt"),
                sep("a/b/"),
                sep("a/b/b.txt"),
            ]
        );
    }

    #[test]
    fn test_level_one_with_dirs_prunes_but_emits_dir() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                include_dirs: true,
                max_depth: 1,
                ..Default::default()
            },
        );
        assert_eq!(rows.first_column(), vec![sep("1.txt"), sep("a/")]);
    }

    #[test]
    fn test_level_two() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                max_depth: 2,
                ..Default::default()
            },
        );
        assert_eq!(rows.first_column(), vec![sep("1.txt"), sep("a/a.txt")]);
    }

    #[test]
    fn test_exclude_files_without_dirs_is_empty() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                exclude_files: true,
                ..Default::default()
            },
        );
        assert!(rows.rows.is_empty());
    }

    #[test]
    fn test_exclude_files_with_dirs_lists_dirs() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                include_dirs: true,
                exclude_files: true,
                ..Default::default()
            },
        );
        assert_eq!(rows.first_column(), vec![sep("a/"), sep("a/b/")]);
    }

    #[test]
    fn test_columns_follow_config_order() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                columns: vec![ColumnKind::Size, ColumnKind::Rel, ColumnKind::Md5],
                ..Default::default()
            },
        );
        assert_eq!(
            rows.rows[0],
            vec![
                "0".to_string(),
                "1.txt".to_string(),
                "d41d8cd98f00b204e9800998ecf8427e".to_string()
            ]
        );
        assert_eq!(rows.rows[1][0], "1");
        assert_eq!(rows.rows[1][2], "0cc175b9c0f1b6a831c399e269772661");
    }

    #[test]
    fn test_dir_rows_have_same_column_count() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                columns: vec![ColumnKind::Rel, ColumnKind::Size, ColumnKind::Sha1],
                include_dirs: true,
                ..Default::default()
            },
        );
        assert!(rows.rows.iter().all(|r| r.len() == 3));
        let dir_row = rows.rows.iter().find(|r| r[0] == sep("a/")).unwrap();
        assert_eq!(dir_row[1], "");
        assert_eq!(dir_row[2], "");
    }

    #[test]
    fn test_abs_paths_are_under_resolved_root() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                columns: vec![ColumnKind::Abs],
                ..Default::default()
            },
        );
        assert_eq!(
            rows.first_column()[0],
            dir.path().join("1.txt").display().to_string()
        );
    }

    #[test]
    fn test_multiple_roots_in_order() {
        let first = sample_tree();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join("z.txt"), "z").unwrap();

        let mut rows = Rows::default();
        let summary = TreeWalker::new(WalkerConfig {
            columns: vec![ColumnKind::Abs],
            ..Default::default()
        })
        .walk_roots(&[second.path(), first.path()], &mut rows)
        .unwrap();

        assert_eq!(summary, WalkSummary { dirs: 0, files: 4 });
        assert_eq!(
            rows.first_column()[0],
            second.path().join("z.txt").display().to_string()
        );
    }

    #[test]
    fn test_missing_root_aborts_before_later_roots() {
        let good = sample_tree();
        let missing = good.path().join("does-not-exist");

        let mut rows = Rows::default();
        let result =
            TreeWalker::new(WalkerConfig::default()).walk_roots(&[missing.as_path(), good.path()], &mut rows);

        assert!(matches!(result, Err(FilistError::Walk(_))));
        assert!(rows.rows.is_empty());
        assert!(!rows.finished);
    }

    #[test]
    fn test_root_that_is_a_file_lists_nothing() {
        let dir = sample_tree();
        let mut rows = Rows::default();
        TreeWalker::new(WalkerConfig::default())
            .walk_roots(&[dir.path().join("1.txt")], &mut rows)
            .unwrap();
        assert!(rows.rows.is_empty());
    }

    #[test]
    fn test_empty_column_list_still_emits_rows() {
        let dir = sample_tree();
        let rows = walk(
            &dir,
            WalkerConfig {
                columns: Vec::new(),
                ..Default::default()
            },
        );
        assert_eq!(rows.rows.len(), 3);
        assert!(rows.rows.iter().all(|r| r.is_empty()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_is_not_followed() {
        let dir = sample_tree();
        std::os::unix::fs::symlink(dir.path().join("a"), dir.path().join("link")).unwrap();

        let rows = walk(&dir, WalkerConfig::default());
        assert!(rows.first_column().contains(&"link".to_string()));
        assert!(!rows.first_column().iter().any(|p| p.starts_with("link/")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_reaches_output_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(dir.path().join(name), "").unwrap();

        let rows = walk(&dir, WalkerConfig::default());
        assert_eq!(rows.raw.len(), 1);
        assert_eq!(rows.raw[0][0].as_bytes(), b"caf\xe9.txt");
    }
}
