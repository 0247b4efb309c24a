//! Daily OHLC candle representation.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::OptweekError;

/// A single trading session's OHLC candle.
///
/// Prices are parsed into [`Decimal`] when the candle is built, so no
/// comparison downstream ever sees the feed's textual representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Session date in the market timezone.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Decimal,
    /// Highest price of the session.
    pub high: Decimal,
    /// Lowest price of the session.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: u64,
    /// Open interest, when the feed reports it.
    pub oi: Option<u64>,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            oi: None,
        }
    }

    /// Builds a candle from the legacy decimal-as-text representation.
    ///
    /// # Errors
    ///
    /// Returns [`OptweekError::Parse`] if any price is not a decimal number.
    pub fn from_text(
        date: NaiveDate,
        open: &str,
        high: &str,
        low: &str,
        close: &str,
    ) -> Result<Self, OptweekError> {
        Ok(Self::new(
            date,
            parse_decimal(open)?,
            parse_decimal(high)?,
            parse_decimal(low)?,
            parse_decimal(close)?,
            0,
        ))
    }

    /// Sets the open interest.
    #[must_use]
    pub const fn with_oi(mut self, oi: u64) -> Self {
        self.oi = Some(oi);
        self
    }

    /// Returns true if open, high and low are all zero.
    ///
    /// The feed emits such candles for sessions without trades, keeping only
    /// a settlement close.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.open.is_zero() && self.high.is_zero() && self.low.is_zero()
    }

    /// Returns a copy with a placeholder candle's open replaced by its close.
    ///
    /// High and low are left as they are.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.is_placeholder() {
            Self {
                open: self.close,
                ..*self
            }
        } else {
            *self
        }
    }

    /// Returns true if the candle closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Parses a price from a JSON value holding either a number or decimal text.
///
/// # Errors
///
/// Returns [`OptweekError::Parse`] for any other value.
pub fn parse_price(value: &serde_json::Value) -> Result<Decimal, OptweekError> {
    match value {
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_decimal(s),
        other => Err(OptweekError::Parse(format!("expected price, got {other}"))),
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, OptweekError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| OptweekError::Parse(format!("invalid price '{text}': {e}")))
}
