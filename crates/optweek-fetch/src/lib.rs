//! Broker client and data fetching for optweek.
//!
//! This crate provides the network side of the pipeline:
//!
//! - [`Broker`] - Narrow interface to the brokerage data source
//! - [`KiteClient`] - Kite Connect client with connection pooling and retries
//! - [`session_checksum`] - Request-token exchange checksum
//! - [`candle_stream_resilient`] - Concurrent per-instrument candle download
//! - [`NseHolidayFeed`] / [`HolidayPage`] - HTTP holiday sources

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod auth;
mod broker;
mod client;
mod error;
mod holidays;
mod parse;
mod stream;
pub mod url;

pub use auth::{Session, session_checksum};
pub use broker::{Broker, Profile};
pub use client::{ClientConfig, KiteClient};
pub use error::FetchError;
pub use holidays::{HolidayPage, NseHolidayFeed, parse_nse_holidays};
pub use parse::{parse_candles, parse_data, parse_error, parse_instruments, parse_ltp};
pub use stream::{CandleBatch, candle_stream_resilient};
