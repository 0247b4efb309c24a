//! Broker candle interval definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Candle interval accepted by the historical data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// 1-minute candles.
    #[serde(rename = "minute")]
    Minute1,
    /// 3-minute candles.
    #[serde(rename = "3minute")]
    Minute3,
    /// 5-minute candles.
    #[serde(rename = "5minute")]
    Minute5,
    /// 10-minute candles.
    #[serde(rename = "10minute")]
    Minute10,
    /// 15-minute candles.
    #[serde(rename = "15minute")]
    Minute15,
    /// 30-minute candles.
    #[serde(rename = "30minute")]
    Minute30,
    /// 60-minute candles.
    #[serde(rename = "60minute")]
    Minute60,
    /// Daily candles.
    #[default]
    #[serde(rename = "day")]
    Day,
}

impl Interval {
    /// Returns the duration in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        match self {
            Self::Minute1 => 60,
            Self::Minute3 => 180,
            Self::Minute5 => 300,
            Self::Minute10 => 600,
            Self::Minute15 => 900,
            Self::Minute30 => 1800,
            Self::Minute60 => 3600,
            Self::Day => 86400,
        }
    }

    /// Returns true for daily candles.
    #[must_use]
    pub const fn is_daily(&self) -> bool {
        matches!(self, Self::Day)
    }

    /// Returns the interval as the broker's path segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "minute",
            Self::Minute3 => "3minute",
            Self::Minute5 => "5minute",
            Self::Minute10 => "10minute",
            Self::Minute15 => "15minute",
            Self::Minute30 => "30minute",
            Self::Minute60 => "60minute",
            Self::Day => "day",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" | "1minute" | "m1" | "1m" => Ok(Self::Minute1),
            "3minute" | "m3" | "3m" => Ok(Self::Minute3),
            "5minute" | "m5" | "5m" => Ok(Self::Minute5),
            "10minute" | "m10" | "10m" => Ok(Self::Minute10),
            "15minute" | "m15" | "15m" => Ok(Self::Minute15),
            "30minute" | "m30" | "30m" => Ok(Self::Minute30),
            "60minute" | "h1" | "1h" => Ok(Self::Minute60),
            "day" | "d1" | "1d" | "daily" => Ok(Self::Day),
            _ => Err(IntervalParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid interval string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalParseError(String);

impl std::fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid interval '{}', expected one of: minute, 3minute, 5minute, 10minute, 15minute, 30minute, 60minute, day",
            self.0
        )
    }
}

impl std::error::Error for IntervalParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_seconds() {
        assert_eq!(Interval::Minute1.seconds(), 60);
        assert_eq!(Interval::Minute60.seconds(), 3600);
        assert_eq!(Interval::Day.seconds(), 86400);
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!("day".parse::<Interval>().unwrap(), Interval::Day);
        assert_eq!("5m".parse::<Interval>().unwrap(), Interval::Minute5);
        assert_eq!("60MINUTE".parse::<Interval>().unwrap(), Interval::Minute60);
        assert!("weekly".parse::<Interval>().is_err());
    }

    #[test]
    fn test_default_is_daily() {
        assert!(Interval::default().is_daily());
        assert_eq!(Interval::default().to_string(), "day");
    }
}
