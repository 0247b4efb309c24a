//! Weekly bullish-continuation scanner for NSE stock options.
//!
//! This is a facade crate that re-exports functionality from the optweek
//! workspace crates and adds the analysis pipeline on top of them.
//!
//! # Quick Start
//!
//! ```ignore
//! use optweek_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KiteClient::with_defaults("api_key")?.with_access_token("access_token");
//!     let today = market_today();
//!     let calendar = HolidayCalendar::load(&NseHolidayFeed::new()?, window_years(today)).await;
//!
//!     let config = AnalysisConfig::new(["ABB", "TCS"]);
//!     let run = run_analysis(&client, &calendar, &config, today).await?;
//!     for signal in run.signals() {
//!         println!("{signal}");
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod expiry;
mod pipeline;
mod report;

pub use config::{AnalysisConfig, parse_symbols};
pub use error::AnalysisError;
pub use expiry::{MIN_DAYS_TO_EXPIRY, filter_option_strikes, select_expiry};
pub use pipeline::{AnalysisReport, AnalysisRun, Progress, run_analysis, run_analysis_with};
pub use report::{ReportFiles, write_original, write_report, write_run};

// Re-export core types
pub use optweek_types::*;

// Re-export the trading calendar
pub use optweek_calendar::{
    AnchorRule, FallbackSource, HolidayCalendar, HolidayError, HolidaySource, SheetSource,
    StaticHolidays, get_holidays, select_week_window, select_week_window_with, window_years,
};

// Re-export fetch functionality
pub use optweek_fetch::{
    Broker, CandleBatch, ClientConfig, FetchError, HolidayPage, KiteClient, NseHolidayFeed,
    Profile, Session, candle_stream_resilient,
};

// Re-export aggregation and classification
pub use optweek_aggregate::{CandleQuartet, WeekBar, WeeklyAggregator, week_bars_for_window};
pub use optweek_pattern::{PatternChecks, Signal, classify, evaluate};

// Re-export formatters
pub use optweek_format::{
    ArtifactNames, CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat,
};

/// Prelude module for convenient imports.
///
/// ```
/// use optweek_lib::prelude::*;
/// ```
pub mod prelude {
    pub use optweek_types::{
        Candle, DateRange, Holiday, HolidaySet, Instrument, InstrumentKey, Interval, OptionType,
        OptweekError, Result, WeekWindow, market_today,
    };

    pub use optweek_calendar::{
        AnchorRule, HolidayCalendar, HolidaySource, select_week_window, window_years,
    };

    pub use optweek_fetch::{Broker, ClientConfig, HolidayPage, KiteClient, NseHolidayFeed};

    pub use optweek_format::OutputFormat;
    pub use optweek_pattern::Signal;

    pub use crate::{AnalysisConfig, AnalysisRun, run_analysis, write_run};
}
