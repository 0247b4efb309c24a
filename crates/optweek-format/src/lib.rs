//! Output formatters for optweek.
//!
//! This crate provides formatters for writing analysis data:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`write_results`] - Plain-text results file
//! - [`ArtifactNames`] - Timestamped output file names

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod artifacts;
mod csv;
mod formatter;
mod json;
mod results;
mod rows;

pub use crate::csv::CsvFormatter;
pub use artifacts::{ARTIFACT_TIMESTAMP_FORMAT, ArtifactNames, DEFAULT_PREFIX};
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use results::write_results;
pub use rows::{DailyRow, InstrumentRow, WeeklyRow};
