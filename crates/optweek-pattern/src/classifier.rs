//! The four-candle classifier.
//!
//! Candles are indexed newest first:
//! `0 = last_week_close, 1 = last_week_open, 2 = first_week_close,
//! 3 = first_week_open`.

use optweek_aggregate::CandleQuartet;
use optweek_types::{Candle, InstrumentKey};
use tracing::trace;

use crate::Signal;

/// Outcome of each condition of the bullish continuation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternChecks {
    /// The earlier week closed above its open: `close[2] > open[3]`.
    pub first_week_green: bool,
    /// The later week closed above its open: `close[0] > open[1]`.
    pub last_week_green: bool,
    /// The later week opened no higher: `open[1] <= open[3]`.
    pub open_flag: bool,
    /// The later week closed no lower: `close[0] >= close[2]`.
    pub close_flag: bool,
}

impl PatternChecks {
    /// Returns true if every condition holds.
    #[must_use]
    pub const fn is_bullish(&self) -> bool {
        self.first_week_green && self.last_week_green && self.open_flag && self.close_flag
    }
}

/// Evaluates each condition on the normalized candles of `quartet`.
///
/// The flags are only meaningful when both weeks are green and are left
/// `false` otherwise.
#[must_use]
pub fn evaluate(quartet: &CandleQuartet) -> PatternChecks {
    let c: [Candle; 4] = quartet.candles().map(|candle| candle.normalized());

    let first_week_green = c[2].close > c[3].open;
    let last_week_green = c[0].close > c[1].open;
    if !(first_week_green && last_week_green) {
        return PatternChecks {
            first_week_green,
            last_week_green,
            ..PatternChecks::default()
        };
    }

    PatternChecks {
        first_week_green,
        last_week_green,
        open_flag: c[1].open <= c[3].open,
        close_flag: c[0].close >= c[2].close,
    }
}

/// Classifies a quartet, returning a signal if it shows a bullish
/// continuation.
#[must_use]
pub fn classify(quartet: &CandleQuartet) -> Option<Signal> {
    let checks = evaluate(quartet);
    trace!(token = quartet.key().token, ?checks, "Classified quartet");
    checks
        .is_bullish()
        .then(|| Signal::new(quartet.key().clone()))
}

/// Classifies newest-first candles; anything but four candles yields no
/// signal.
#[must_use]
pub fn classify_candles(key: InstrumentKey, candles: Vec<Candle>) -> Option<Signal> {
    CandleQuartet::new(key, candles).as_ref().and_then(classify)
}
