//! JSON Lines output formatting

use std::ffi::OsString;
use std::io::{self, Write};

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::column::ColumnKind;
use crate::tree::EntryOutput;

/// Writes each entry as a JSON object on its own line.
///
/// Keys are column names in pipeline order; values are the same cells the
/// tab format prints. JSON strings must be Unicode, so bytes that are not
/// valid UTF-8 become U+FFFD.
pub struct JsonLinesFormatter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Borrowed row, serialized as an ordered map.
struct JsonRow<'a> {
    columns: &'a [ColumnKind],
    values: &'a [OsString],
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column.name(), &value.to_string_lossy())?;
        }
        map.end()
    }
}

impl<W: Write> EntryOutput for JsonLinesFormatter<W> {
    fn output_entry(&mut self, columns: &[ColumnKind], values: &[OsString]) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &JsonRow { columns, values })?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
