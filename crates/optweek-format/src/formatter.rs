//! Output format abstraction.

use std::io::Write;

use thiserror::Error;

use crate::{DailyRow, InstrumentRow, WeeklyRow};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes an instrument list.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_instruments<W: Write + Send>(
        &self,
        rows: &[InstrumentRow],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes daily OHLC rows, placeholders included.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_daily<W: Write + Send>(&self, rows: &[DailyRow], writer: W) -> Result<(), FormatError>;

    /// Writes weekly OHLC rows.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_weekly<W: Write + Send>(&self, rows: &[WeeklyRow], writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert!(matches!(
            "parquet".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_display_matches_extension() {
        for format in OutputFormat::all() {
            assert_eq!(format.to_string(), format.extension());
        }
    }
}
