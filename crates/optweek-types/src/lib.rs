//! Core types for the optweek options scanner.
//!
//! This crate provides the fundamental data structures used throughout optweek:
//!
//! - [`Candle`] - A daily OHLC candle with decimal prices
//! - [`Instrument`] - Broker instrument record (option, future or equity)
//! - [`HolidaySet`] - Exchange holidays for a single year
//! - [`WeekWindow`] - Open/close trading days of the two weeks under analysis
//! - [`DateRange`] - Inclusive date range for historical requests
//! - [`Interval`] - Broker candle interval

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candle;
mod date;
mod date_range;
mod error;
mod holiday;
mod instrument;
mod interval;
mod window;

pub use candle::{Candle, parse_price};
pub use date::{MARKET_TZ, market_date, market_datetime, market_now, market_today};
pub use date_range::DateRange;
pub use error::{DateRangeError, OptweekError, Result, WindowError};
pub use holiday::{Holiday, HolidaySet};
pub use instrument::{Instrument, InstrumentKey, InstrumentType, OptionType};
pub use interval::{Interval, IntervalParseError};
pub use window::WeekWindow;
