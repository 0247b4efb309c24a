//! Error types for optweek.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for optweek operations.
pub type Result<T> = std::result::Result<T, OptweekError>;

/// Errors that can occur while ingesting and analysing market data.
#[derive(Error, Debug)]
pub enum OptweekError {
    /// Invalid data format.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// The resolved trading window violates its ordering invariant.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// No data available for the requested instrument.
    #[error("No data available for {instrument} in requested range")]
    NoDataAvailable {
        /// The instrument that had no data.
        instrument: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}

/// Error for week windows whose dates are out of order or too wide.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// A week opens after it closes.
    #[error("{week} week opens on {open} but closes on {close}")]
    InvertedWeek {
        /// Which week ("first" or "last").
        week: &'static str,
        /// Resolved open date.
        open: NaiveDate,
        /// Resolved close date.
        close: NaiveDate,
    },

    /// The first week closes on or after the last week opens.
    #[error("first week closes on {first_close} but last week opens on {last_open}")]
    Overlapping {
        /// Resolved first-week close.
        first_close: NaiveDate,
        /// Resolved last-week open.
        last_open: NaiveDate,
    },

    /// A week spans more than a single Monday-to-Friday week.
    #[error("{week} week spans {days} days ({open} to {close})")]
    TooWide {
        /// Which week ("first" or "last").
        week: &'static str,
        /// Resolved open date.
        open: NaiveDate,
        /// Resolved close date.
        close: NaiveDate,
        /// Calendar days between open and close.
        days: i64,
    },
}
