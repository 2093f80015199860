//! Command-line surface
//!
//! Parses argv with clap, turns the flags into a `WalkerConfig`, and runs the
//! walk. Everything, including usage and errors, goes to one output stream.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use tracing::debug;

use crate::column::ColumnKind;
use crate::error::Result;
use crate::output::{JsonLinesFormatter, OutputFormat, TabFormatter};
use crate::tree::{TreeWalker, WalkSummary, WalkerConfig};

/// Exit code for success and `--help`/`--version`.
pub const EXIT_OK: i32 = 0;
/// Exit code for usage errors and failed walks.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "filist")]
#[command(about = "List the files under one or more directories, one line per entry")]
#[command(version)]
pub struct Args {
    /// Directories to list
    #[arg(value_name = "DIRECTORY")]
    pub dirs: Vec<PathBuf>,

    /// Print relative path (if neither --rel nor --abs is given, the relative
    /// path is printed as the first column)
    #[arg(short, long, action = ArgAction::Count)]
    pub rel: u8,

    /// Print absolute path
    #[arg(short, long, action = ArgAction::Count)]
    pub abs: u8,

    /// Print file size
    #[arg(short, long, action = ArgAction::Count)]
    pub size: u8,

    /// Print modification time
    #[arg(short, long, action = ArgAction::Count)]
    pub mtime: u8,

    /// Print MD5 hash
    #[arg(short = 'M', long, action = ArgAction::Count)]
    pub md5: u8,

    /// Print SHA-1 hash
    #[arg(short = 'S', long, action = ArgAction::Count)]
    pub sha1: u8,

    /// Print SHA-256 hash
    #[arg(long, action = ArgAction::Count)]
    pub sha256: u8,

    /// Include directories
    #[arg(long, overrides_with = "include_dir")]
    pub include_dir: bool,

    /// Exclude files
    #[arg(long, overrides_with = "exclude_file")]
    pub exclude_file: bool,

    /// Number of directory levels to descend (0 = unlimited)
    #[arg(short, long, value_name = "N", default_value_t = 0, overrides_with = "level")]
    pub level: usize,

    /// Print one JSON object per entry instead of tab-separated columns
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::JsonLines
        } else {
            OutputFormat::Tab
        }
    }
}

/// Build the column pipeline from the columns requested, in flag order.
///
/// A repeated column keeps its first position. When neither path column was
/// requested, the relative path is prepended.
pub fn build_columns(requested: &[ColumnKind]) -> Vec<ColumnKind> {
    let mut columns = Vec::with_capacity(requested.len() + 1);
    if !requested.iter().any(|c| c.is_path()) {
        columns.push(ColumnKind::Rel);
    }
    for &column in requested {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    columns
}

/// Column flags present on the command line, ordered by first occurrence.
///
/// Counted flags always carry a default of 0, and `index_of` reports an
/// index for that default too, so only flags given at least once count.
pub fn requested_columns(matches: &ArgMatches) -> Vec<ColumnKind> {
    let mut present: Vec<(usize, ColumnKind)> = ColumnKind::ALL
        .iter()
        .filter(|kind| matches.get_count(kind.name()) > 0)
        .filter_map(|&kind| matches.index_of(kind.name()).map(|index| (index, kind)))
        .collect();
    present.sort_by_key(|&(index, _)| index);
    present.into_iter().map(|(_, kind)| kind).collect()
}

/// Resolve the run configuration from parsed arguments.
pub fn walker_config(args: &Args, matches: &ArgMatches) -> WalkerConfig {
    WalkerConfig {
        columns: build_columns(&requested_columns(matches)),
        include_dirs: args.include_dir,
        exclude_files: args.exclude_file,
        max_depth: args.level,
    }
}

/// Parse `argv` (including the program name), list every directory, and
/// return the process exit code.
pub fn run<I, T, W>(argv: I, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let mut command = Args::command();
    let parsed = command
        .try_get_matches_from_mut(argv)
        .and_then(|matches| Args::from_arg_matches(&matches).map(|args| (args, matches)));

    let (args, matches) = match parsed {
        Ok(parsed) => parsed,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = write!(out, "{}", e);
            return EXIT_OK;
        }
        Err(e) => {
            let _ = write!(out, "{}", command.render_help());
            let _ = writeln!(out, "Error: {}", clap_message(&e));
            return EXIT_FAILURE;
        }
    };

    if args.dirs.is_empty() {
        let _ = write!(out, "{}", command.render_help());
        return EXIT_FAILURE;
    }

    let config = walker_config(&args, &matches);
    debug!(?config, roots = args.dirs.len(), "resolved configuration");

    match list(&args.dirs, config, args.output_format(), &mut *out) {
        Ok(summary) => {
            debug!(dirs = summary.dirs, files = summary.files, "listing complete");
            EXIT_OK
        }
        Err(e) => {
            debug!(error = %e, "listing failed");
            let _ = writeln!(out, "Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Flush `out` after `run` and fold a failed flush into the exit code.
///
/// Usage and `Error: ` text is written without checking, so a closed stream
/// is only noticed here.
pub fn flush_output<W: Write>(code: i32, out: &mut W) -> i32 {
    match out.flush() {
        Ok(()) => code,
        Err(e) => {
            debug!(error = %e, "flushing output failed");
            EXIT_FAILURE
        }
    }
}

/// Walk `roots` in order with the formatter for `format`.
pub fn list<W: Write>(
    roots: &[PathBuf],
    config: WalkerConfig,
    format: OutputFormat,
    out: W,
) -> Result<WalkSummary> {
    let walker = TreeWalker::new(config);
    match format {
        OutputFormat::Tab => walker.walk_roots(roots, &mut TabFormatter::new(out)),
        OutputFormat::JsonLines => walker.walk_roots(roots, &mut JsonLinesFormatter::new(out)),
    }
}

/// First line of a clap error without its `error: ` tag.
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
