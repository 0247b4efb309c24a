//! Pipeline errors.

use optweek_fetch::FetchError;
use optweek_format::FormatError;
use optweek_types::WindowError;
use thiserror::Error;

/// Errors that end an analysis run.
///
/// Per-symbol and per-contract failures are logged and skipped instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The trading window could not be resolved.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// A broker call the whole run depends on failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The reference symbol has no listed expiry.
    #[error("no expiry listed for reference symbol {symbol}")]
    NoExpiry {
        /// Reference symbol searched for.
        symbol: String,
    },

    /// An output file could not be written.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// An output file could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
