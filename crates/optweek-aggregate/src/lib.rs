//! Weekly aggregation for optweek.
//!
//! This crate provides daily-to-weekly candle aggregation:
//!
//! - [`WeekBar`] - Weekly OHLC bar
//! - [`WeeklyAggregator`] - Streaming daily candle aggregator
//! - [`CandleQuartet`] - The four window-date candles of one instrument

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod quartet;
mod week_bar;

pub use aggregator::{WeeklyAggregator, aggregate_weekly, week_bars_for_window};
pub use quartet::{CandleQuartet, QuartetOrder, window_candles};
pub use week_bar::WeekBar;
