//! Weekly OHLC bar.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLC bar covering the sessions of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBar {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Date of the first session in the bar.
    pub open_date: NaiveDate,
    /// Date of the last session in the bar.
    pub close_date: NaiveDate,
    /// First session's open.
    pub open: Decimal,
    /// Highest price of the week.
    pub high: Decimal,
    /// Lowest price of the week.
    pub low: Decimal,
    /// Last session's close.
    pub close: Decimal,
    /// Total traded volume.
    pub volume: u64,
    /// Number of sessions in the bar.
    pub sessions: u32,
}

impl WeekBar {
    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// Returns true if the week closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the week closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
