//! Streaming output formatter
//!
//! `TabFormatter` joins column values with a single tab and ends every
//! entry with a newline. On Unix the cells are written as their raw OS
//! bytes, so names that are not valid UTF-8 come out exactly as stored.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};

use crate::column::ColumnKind;
use crate::tree::EntryOutput;

/// Tab-separated row writer.
pub struct TabFormatter<W: Write> {
    out: W,
}

impl<W: Write> TabFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(unix)]
fn cell_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(value.as_bytes())
}

#[cfg(not(unix))]
fn cell_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    match value.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

impl<W: Write> EntryOutput for TabFormatter<W> {
    fn output_entry(&mut self, _columns: &[ColumnKind], values: &[OsString]) -> io::Result<()> {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b"\t")?;
            }
            self.out.write_all(&cell_bytes(value))?;
        }
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
