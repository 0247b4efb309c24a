//! Bullish continuation classifier for optweek.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod classifier;
mod signal;

pub use classifier::{PatternChecks, classify, classify_candles, evaluate};
pub use signal::Signal;
