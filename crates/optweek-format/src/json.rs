//! JSON output format.

use std::io::Write;

use serde::Serialize;

use crate::{DailyRow, FormatError, Formatter, InstrumentRow, WeeklyRow};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn write_rows<T: Serialize, W: Write>(&self, rows: &[T], mut writer: W) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, rows)?;
                } else {
                    serde_json::to_writer(&mut writer, rows)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for row in rows {
                    serde_json::to_writer(&mut writer, row)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_instruments<W: Write + Send>(
        &self,
        rows: &[InstrumentRow],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_rows(rows, writer)
    }

    fn write_daily<W: Write + Send>(&self, rows: &[DailyRow], writer: W) -> Result<(), FormatError> {
        self.write_rows(rows, writer)
    }

    fn write_weekly<W: Write + Send>(&self, rows: &[WeeklyRow], writer: W) -> Result<(), FormatError> {
        self.write_rows(rows, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
