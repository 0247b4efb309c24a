//! Broker response decoding.
//!
//! JSON responses come wrapped in an envelope:
//! `{"status": "success", "data": ...}` or
//! `{"status": "error", "error_type": ..., "message": ...}`.
//! The instrument dump is plain CSV.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use optweek_types::{Candle, Instrument, InstrumentType, market_date, parse_price};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::FetchError;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decodes the `data` member of a successful response.
///
/// # Errors
///
/// Returns [`FetchError::Api`] for an error envelope and
/// [`FetchError::Parse`] for anything that is not an envelope.
pub fn parse_data<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    if envelope.status != "success" {
        return Err(FetchError::Api {
            status: 200,
            error_type: envelope.error_type.unwrap_or_else(|| "GeneralException".to_string()),
            message: envelope.message.unwrap_or_default(),
        });
    }
    envelope
        .data
        .ok_or_else(|| FetchError::Parse("success response without data".to_string()))
}

/// Builds the error for a failed HTTP status, reading the error envelope
/// when the body carries one.
#[must_use]
pub fn parse_error(status: u16, body: &[u8]) -> FetchError {
    match serde_json::from_slice::<Envelope<Value>>(body) {
        Ok(envelope) if envelope.status == "error" => FetchError::Api {
            status,
            error_type: envelope.error_type.unwrap_or_else(|| "GeneralException".to_string()),
            message: envelope.message.unwrap_or_default(),
        },
        _ => FetchError::ServerError { status },
    }
}

#[derive(Debug, Deserialize)]
struct InstrumentRow {
    instrument_token: u64,
    tradingsymbol: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    expiry: String,
    #[serde(default)]
    strike: String,
    #[serde(default)]
    lot_size: String,
    instrument_type: String,
    #[serde(default)]
    exchange: String,
}

impl InstrumentRow {
    fn into_instrument(self) -> Result<Instrument, FetchError> {
        let expiry = if self.expiry.trim().is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(self.expiry.trim(), "%Y-%m-%d")
                    .map_err(|e| FetchError::Parse(format!("invalid expiry '{}': {e}", self.expiry)))?,
            )
        };
        let strike = if self.strike.trim().is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from_str(self.strike.trim())
                .map_err(|e| FetchError::Parse(format!("invalid strike '{}': {e}", self.strike)))?
                .normalize()
        };
        let lot_size = parse_lot_size(&self.lot_size)?;
        let Ok(instrument_type) = InstrumentType::from_str(&self.instrument_type);

        Ok(Instrument {
            token: self.instrument_token,
            tradingsymbol: self.tradingsymbol,
            name: self.name,
            strike,
            expiry,
            instrument_type,
            exchange: self.exchange,
            lot_size,
        })
    }
}

fn parse_lot_size(text: &str) -> Result<u32, FetchError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<u32>()
        .or_else(|_| text.parse::<f64>().map(|v| v as u32))
        .map_err(|e| FetchError::Parse(format!("invalid lot size '{text}': {e}")))
}

/// Parses the instrument dump CSV.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] if a row is malformed.
pub fn parse_instruments(body: &[u8]) -> Result<Vec<Instrument>, FetchError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(body);
    reader
        .deserialize::<InstrumentRow>()
        .map(|row| row?.into_instrument())
        .collect()
}

#[derive(Debug, Deserialize)]
struct CandleData {
    candles: Vec<Vec<Value>>,
}

/// Parses a historical data response.
///
/// Each row is `[timestamp, open, high, low, close, volume, oi?]`. The
/// timestamp is reduced to its market-local date.
///
/// # Errors
///
/// Returns an error for an error envelope or a malformed row.
pub fn parse_candles(body: &[u8]) -> Result<Vec<Candle>, FetchError> {
    let data: CandleData = parse_data(body)?;
    data.candles.iter().map(|row| parse_candle_row(row)).collect()
}

fn parse_candle_row(row: &[Value]) -> Result<Candle, FetchError> {
    if row.len() < 6 {
        return Err(FetchError::Parse(format!(
            "candle row has {} fields, expected at least 6",
            row.len()
        )));
    }
    let date = parse_timestamp(&row[0])?;
    let candle = Candle::new(
        date,
        parse_price(&row[1])?,
        parse_price(&row[2])?,
        parse_price(&row[3])?,
        parse_price(&row[4])?,
        parse_count(&row[5])?,
    );
    match row.get(6) {
        Some(oi) if !oi.is_null() => Ok(candle.with_oi(parse_count(oi)?)),
        _ => Ok(candle),
    }
}

fn parse_timestamp(value: &Value) -> Result<NaiveDate, FetchError> {
    let text = value
        .as_str()
        .ok_or_else(|| FetchError::Parse(format!("expected timestamp, got {value}")))?;
    let instant = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .map_err(|e| FetchError::Parse(format!("invalid timestamp '{text}': {e}")))?;
    Ok(market_date(instant.with_timezone(&Utc)))
}

fn parse_count(value: &Value) -> Result<u64, FetchError> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v.round() as u64))
        .ok_or_else(|| FetchError::Parse(format!("expected count, got {value}")))
}

/// Parses a last-traded-price response into `key -> price`.
///
/// # Errors
///
/// Returns an error for an error envelope or an entry without a price.
pub fn parse_ltp(body: &[u8]) -> Result<HashMap<String, Decimal>, FetchError> {
    let data: HashMap<String, Value> = parse_data(body)?;
    data.into_iter()
        .map(|(key, quote)| {
            let price = quote
                .get("last_price")
                .ok_or_else(|| FetchError::Parse(format!("no last_price for {key}")))?;
            Ok((key, parse_price(price)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use optweek_types::OptionType;
    use rust_decimal_macros::dec;

    const INSTRUMENTS_CSV: &str = "\
instrument_token,exchange_token,tradingsymbol,name,last_price,expiry,strike,tick_size,lot_size,instrument_type,segment,exchange
12345678,48225,ABB25JUN5600CE,\"ABB\",0,2025-06-26,5600.0,0.05,125,CE,NFO-OPT,NFO
12345679,48226,ABB25JUN5400PE,\"ABB\",0,2025-06-26,5400.0,0.05,125,PE,NFO-OPT,NFO
13000000,50000,ABB25JUNFUT,\"ABB\",0,2025-06-26,0,0.1,125,FUT,NFO-FUT,NFO
";

    #[test]
    fn test_parse_instruments() {
        let instruments = parse_instruments(INSTRUMENTS_CSV.as_bytes()).unwrap();
        assert_eq!(instruments.len(), 3);

        let call = &instruments[0];
        assert_eq!(call.token, 12_345_678);
        assert_eq!(call.name, "ABB");
        assert_eq!(call.strike, dec!(5600));
        assert_eq!(call.expiry, NaiveDate::from_ymd_opt(2025, 6, 26));
        assert_eq!(call.option_type(), Some(OptionType::Call));
        assert_eq!(call.lot_size, 125);

        assert_eq!(instruments[1].option_type(), Some(OptionType::Put));
        assert_eq!(instruments[2].instrument_type, InstrumentType::Future);
    }

    #[test]
    fn test_parse_instruments_bad_expiry() {
        let csv = "instrument_token,tradingsymbol,name,expiry,strike,lot_size,instrument_type,exchange\n1,X,X,26/06/2025,1,1,CE,NFO\n";
        assert!(matches!(parse_instruments(csv.as_bytes()), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_parse_candles() {
        let body = br#"{"status":"success","data":{"candles":[
            ["2025-06-02T00:00:00+0530", 120.5, 131, 118.25, "129.40", 10500, 42000],
            ["2025-06-03T00:00:00+0530", 0, 0, 0, 128.1, 0]
        ]}}"#;
        let candles = parse_candles(body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(candles[0].open, dec!(120.5));
        assert_eq!(candles[0].close, dec!(129.40));
        assert_eq!(candles[0].volume, 10_500);
        assert_eq!(candles[0].oi, Some(42_000));
        assert!(candles[1].is_placeholder());
        assert_eq!(candles[1].oi, None);
    }

    #[test]
    fn test_parse_candles_short_row() {
        let body = br#"{"status":"success","data":{"candles":[["2025-06-02T00:00:00+0530", 1, 2]]}}"#;
        assert!(matches!(parse_candles(body), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_parse_ltp() {
        let body = br#"{"status":"success","data":{"NSE:ABB":{"instrument_token":3329,"last_price":5512.5}}}"#;
        let ltp = parse_ltp(body).unwrap();
        assert_eq!(ltp.get("NSE:ABB"), Some(&dec!(5512.5)));
    }

    #[test]
    fn test_error_envelope() {
        let body = br#"{"status":"error","error_type":"TokenException","message":"Incorrect api_key or access_token."}"#;
        match parse_error(403, body) {
            FetchError::Api {
                status,
                error_type,
                message,
            } => {
                assert_eq!(status, 403);
                assert_eq!(error_type, "TokenException");
                assert!(message.contains("access_token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(parse_data::<Value>(body), Err(FetchError::Api { .. })));
    }

    #[test]
    fn test_error_without_envelope() {
        assert!(matches!(
            parse_error(502, b"<html>Bad gateway</html>"),
            FetchError::ServerError { status: 502 }
        ));
    }
}
