//! CSV output format.

use std::io::Write;

use serde::Serialize;

use crate::{DailyRow, FormatError, Formatter, InstrumentRow, WeeklyRow};

/// CSV formatter.
///
/// Fields holding the delimiter, quotes or line breaks are quoted, so free-text
/// names survive a round trip through any CSV reader.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: u8,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Serializes rows after an optional header.
    ///
    /// The header is written even when there are no rows.
    fn write_rows<T: Serialize, W: Write>(
        &self,
        header: &[&str],
        rows: &[T],
        writer: W,
    ) -> Result<(), FormatError> {
        let mut csv = ::csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(writer);

        if self.include_header {
            csv.write_record(header)?;
        }
        for row in rows {
            csv.serialize(row)?;
        }

        csv.flush()?;
        Ok(())
    }
}

const INSTRUMENT_COLUMNS: &[&str] = &[
    "instrument_token",
    "tradingsymbol",
    "name",
    "expiry",
    "strike",
    "lot_size",
    "instrument_type",
    "exchange",
];

const DAILY_COLUMNS: &[&str] = &[
    "instrument_token",
    "name",
    "strike",
    "expiry",
    "instrument_type",
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "oi",
    "note",
];

const WEEKLY_COLUMNS: &[&str] = &[
    "instrument_token",
    "name",
    "strike",
    "expiry",
    "instrument_type",
    "week_start",
    "open_date",
    "close_date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "sessions",
];

impl Formatter for CsvFormatter {
    fn write_instruments<W: Write + Send>(
        &self,
        rows: &[InstrumentRow],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_rows(INSTRUMENT_COLUMNS, rows, writer)
    }

    fn write_daily<W: Write + Send>(&self, rows: &[DailyRow], writer: W) -> Result<(), FormatError> {
        self.write_rows(DAILY_COLUMNS, rows, writer)
    }

    fn write_weekly<W: Write + Send>(&self, rows: &[WeeklyRow], writer: W) -> Result<(), FormatError> {
        self.write_rows(WEEKLY_COLUMNS, rows, writer)
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
