//! Flat row views of analysis data.
//!
//! Formatters write these instead of the domain types so every output format
//! shares one column layout.

use chrono::NaiveDate;
use optweek_aggregate::WeekBar;
use optweek_types::{Candle, Instrument, InstrumentKey};
use rust_decimal::Decimal;
use serde::Serialize;

/// One contract from the instrument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentRow {
    /// Broker token.
    pub instrument_token: u64,
    /// Exchange trading symbol.
    pub tradingsymbol: String,
    /// Underlying name.
    pub name: String,
    /// Expiry date, if any.
    pub expiry: Option<NaiveDate>,
    /// Strike price.
    pub strike: Decimal,
    /// Lot size.
    pub lot_size: u32,
    /// Broker instrument type code.
    pub instrument_type: String,
    /// Exchange code.
    pub exchange: String,
}

impl From<&Instrument> for InstrumentRow {
    fn from(instrument: &Instrument) -> Self {
        Self {
            instrument_token: instrument.token,
            tradingsymbol: instrument.tradingsymbol.clone(),
            name: instrument.name.clone(),
            expiry: instrument.expiry,
            strike: instrument.strike.normalize(),
            lot_size: instrument.lot_size,
            instrument_type: instrument.instrument_type.to_string(),
            exchange: instrument.exchange.clone(),
        }
    }
}

/// One daily session of one contract.
///
/// A row whose price fields are all `None` stands in for a contract whose
/// history could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRow {
    /// Broker token.
    pub instrument_token: u64,
    /// Underlying name.
    pub name: String,
    /// Strike price.
    pub strike: Decimal,
    /// Expiry date.
    pub expiry: Option<NaiveDate>,
    /// Broker instrument type code.
    pub instrument_type: String,
    /// Session date.
    pub date: Option<NaiveDate>,
    /// Opening price.
    pub open: Option<Decimal>,
    /// Session high.
    pub high: Option<Decimal>,
    /// Session low.
    pub low: Option<Decimal>,
    /// Closing price.
    pub close: Option<Decimal>,
    /// Traded volume.
    pub volume: Option<u64>,
    /// Open interest.
    pub oi: Option<u64>,
    /// Free-text note; "no data" on placeholders.
    pub note: String,
}

impl DailyRow {
    /// Note carried by placeholder rows.
    pub const NO_DATA: &'static str = "no data";

    /// Creates a row for a fetched candle.
    #[must_use]
    pub fn from_candle(key: &InstrumentKey, candle: &Candle) -> Self {
        Self {
            date: Some(candle.date),
            open: Some(candle.open),
            high: Some(candle.high),
            low: Some(candle.low),
            close: Some(candle.close),
            volume: Some(candle.volume),
            oi: candle.oi,
            note: String::new(),
            ..Self::keyed(key)
        }
    }

    /// Creates the placeholder row for a contract without data.
    #[must_use]
    pub fn placeholder(key: &InstrumentKey) -> Self {
        Self {
            note: Self::NO_DATA.to_string(),
            ..Self::keyed(key)
        }
    }

    /// Returns true if this row stands in for missing data.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.date.is_none()
    }

    fn keyed(key: &InstrumentKey) -> Self {
        Self {
            instrument_token: key.token,
            name: key.name.clone(),
            strike: key.strike.normalize(),
            expiry: key.expiry,
            instrument_type: key.instrument_type.to_string(),
            date: None,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
            oi: None,
            note: String::new(),
        }
    }
}

/// One weekly bar of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyRow {
    /// Broker token.
    pub instrument_token: u64,
    /// Underlying name.
    pub name: String,
    /// Strike price.
    pub strike: Decimal,
    /// Expiry date.
    pub expiry: Option<NaiveDate>,
    /// Broker instrument type code.
    pub instrument_type: String,
    /// Monday of the bar's week.
    pub week_start: NaiveDate,
    /// First session in the bar.
    pub open_date: NaiveDate,
    /// Last session in the bar.
    pub close_date: NaiveDate,
    /// Opening price.
    pub open: Decimal,
    /// Weekly high.
    pub high: Decimal,
    /// Weekly low.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Summed volume.
    pub volume: u64,
    /// Number of sessions aggregated.
    pub sessions: u32,
}

impl WeeklyRow {
    /// Creates a row for `bar` of the contract `key`.
    #[must_use]
    pub fn new(key: &InstrumentKey, bar: &WeekBar) -> Self {
        Self {
            instrument_token: key.token,
            name: key.name.clone(),
            strike: key.strike.normalize(),
            expiry: key.expiry,
            instrument_type: key.instrument_type.to_string(),
            week_start: bar.week_start,
            open_date: bar.open_date,
            close_date: bar.close_date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            sessions: bar.sessions,
        }
    }
}
