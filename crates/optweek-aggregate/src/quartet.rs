//! Selection of the four window-date candles.

use optweek_types::{Candle, InstrumentKey, WeekWindow};

/// Order of the candles handed to [`CandleQuartet::from_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuartetOrder {
    /// `[last_week_close, last_week_open, first_week_close, first_week_open]`.
    #[default]
    NewestFirst,
    /// `[first_week_open, first_week_close, last_week_open, last_week_close]`.
    OldestFirst,
}

/// Exactly four candles of one instrument, newest first:
/// `[last_week_close, last_week_open, first_week_close, first_week_open]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleQuartet {
    key: InstrumentKey,
    candles: [Candle; 4],
}

impl CandleQuartet {
    /// Creates a quartet from newest-first candles.
    ///
    /// Returns `None` unless exactly four candles are given.
    #[must_use]
    pub fn new(key: InstrumentKey, candles: Vec<Candle>) -> Option<Self> {
        Self::from_ordered(key, candles, QuartetOrder::NewestFirst)
    }

    /// Creates a quartet from candles in the given order.
    ///
    /// Returns `None` unless exactly four candles are given.
    #[must_use]
    pub fn from_ordered(key: InstrumentKey, mut candles: Vec<Candle>, order: QuartetOrder) -> Option<Self> {
        if order == QuartetOrder::OldestFirst {
            candles.reverse();
        }
        let candles: [Candle; 4] = candles.try_into().ok()?;
        Some(Self { key, candles })
    }

    /// Picks the candles of the four window dates from an instrument's daily
    /// candles.
    ///
    /// Returns `None` if any window date has no candle. When a date appears
    /// twice the first candle wins.
    #[must_use]
    pub fn from_daily(key: InstrumentKey, daily: &[Candle], window: &WeekWindow) -> Option<Self> {
        let candles = window
            .newest_first()
            .into_iter()
            .map(|date| daily.iter().find(|c| c.date == date).copied())
            .collect::<Option<Vec<Candle>>>()?;
        Self::new(key, candles)
    }

    /// Returns the instrument the candles belong to.
    #[must_use]
    pub const fn key(&self) -> &InstrumentKey {
        &self.key
    }

    /// Returns the candles, newest first.
    #[must_use]
    pub const fn candles(&self) -> &[Candle; 4] {
        &self.candles
    }
}

/// Returns the candles falling on the window dates, in date order.
#[must_use]
pub fn window_candles(daily: &[Candle], window: &WeekWindow) -> Vec<Candle> {
    let mut selected: Vec<Candle> = daily
        .iter()
        .filter(|c| window.is_window_date(c.date))
        .copied()
        .collect();
    selected.sort_by_key(|c| c.date);
    selected
}
