//! Streaming daily-to-weekly aggregation.

use chrono::{Datelike, Days, NaiveDate};
use optweek_types::{Candle, WeekWindow};
use rust_decimal::Decimal;

use crate::WeekBar;

/// Streaming daily candle aggregator.
///
/// Candles must arrive in date order. Each bar covers one Monday-to-Sunday
/// week and is emitted when the first candle of a later week arrives.
#[derive(Debug, Default)]
pub struct WeeklyAggregator {
    current_bar: Option<WeekBarBuilder>,
}

impl WeeklyAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self { current_bar: None }
    }

    /// Processes a candle, potentially emitting a completed bar.
    ///
    /// Returns `Some(bar)` when this candle starts a new week,
    /// `None` otherwise.
    pub fn process(&mut self, candle: &Candle) -> Option<WeekBar> {
        let week_start = week_start_for(candle.date);

        match self.current_bar.take() {
            Some(mut builder) if builder.week_start == week_start => {
                builder.update(candle);
                self.current_bar = Some(builder);
                None
            }
            Some(builder) => {
                let completed = builder.finish();
                self.current_bar = Some(WeekBarBuilder::new(week_start, candle));
                Some(completed)
            }
            None => {
                self.current_bar = Some(WeekBarBuilder::new(week_start, candle));
                None
            }
        }
    }

    /// Finishes aggregation, returning any remaining partial bar.
    #[must_use]
    pub fn finish(self) -> Option<WeekBar> {
        self.current_bar.map(WeekBarBuilder::finish)
    }
}

/// Aggregates date-ordered daily candles into weekly bars.
#[must_use]
pub fn aggregate_weekly(candles: &[Candle]) -> Vec<WeekBar> {
    let mut aggregator = WeeklyAggregator::new();
    let mut bars: Vec<WeekBar> = candles.iter().filter_map(|c| aggregator.process(c)).collect();
    bars.extend(aggregator.finish());
    bars
}

/// Builds the bars of the two window weeks, each bounded by the week's open
/// and close dates.
///
/// A week without candles has no bar, so the result holds at most two bars,
/// earlier week first.
#[must_use]
pub fn week_bars_for_window(candles: &[Candle], window: &WeekWindow) -> Vec<WeekBar> {
    let mut sorted: Vec<Candle> = candles.to_vec();
    sorted.sort_by_key(|c| c.date);

    [
        (window.first_week_open(), window.first_week_close()),
        (window.last_week_open(), window.last_week_close()),
    ]
    .into_iter()
    .filter_map(|(open, close)| {
        let mut week = sorted.iter().filter(|c| c.date >= open && c.date <= close);
        let mut builder = WeekBarBuilder::new(week_start_for(open), week.next()?);
        for candle in week {
            builder.update(candle);
        }
        Some(builder.finish())
    })
    .collect()
}

/// Returns the Monday of the week containing `date`.
fn week_start_for(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Builder for weekly bars.
#[derive(Debug)]
struct WeekBarBuilder {
    week_start: NaiveDate,
    open_date: NaiveDate,
    close_date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: u64,
    sessions: u32,
}

impl WeekBarBuilder {
    fn new(week_start: NaiveDate, candle: &Candle) -> Self {
        let candle = candle.normalized();
        let (high, low) = extremes(&candle);
        Self {
            week_start,
            open_date: candle.date,
            close_date: candle.date,
            open: candle.open,
            high,
            low,
            close: candle.close,
            volume: candle.volume,
            sessions: 1,
        }
    }

    fn update(&mut self, candle: &Candle) {
        let candle = candle.normalized();
        let (high, low) = extremes(&candle);
        self.high = self.high.max(high);
        self.low = self.low.min(low);
        self.close = candle.close;
        self.close_date = candle.date;
        self.volume = self.volume.saturating_add(candle.volume);
        self.sessions += 1;
    }

    const fn finish(self) -> WeekBar {
        WeekBar {
            week_start: self.week_start,
            open_date: self.open_date,
            close_date: self.close_date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            sessions: self.sessions,
        }
    }
}

/// High and low of a candle; a session without trades contributes its close.
fn extremes(candle: &Candle) -> (Decimal, Decimal) {
    if candle.high.is_zero() && candle.low.is_zero() {
        (candle.close, candle.close)
    } else {
        (candle.high, candle.low)
    }
}
