//! Broker instrument definitions.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::OptweekError;

/// Option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option.
    #[serde(rename = "CE")]
    Call,
    /// Put option.
    #[serde(rename = "PE")]
    Put,
}

impl OptionType {
    /// Returns the exchange code ("CE" or "PE").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }

    /// Returns both option types, calls first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Call, Self::Put]
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = OptweekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CE" | "CALL" => Ok(Self::Call),
            "PE" | "PUT" => Ok(Self::Put),
            _ => Err(OptweekError::Parse(format!(
                "invalid option type '{s}', expected CE or PE"
            ))),
        }
    }
}

/// Instrument type as reported by the broker's instrument dump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Option contract.
    Option(OptionType),
    /// Futures contract.
    Future,
    /// Cash equity.
    Equity,
    /// Anything else, kept verbatim.
    Other(String),
}

impl InstrumentType {
    /// Returns the option side, if this is an option.
    #[must_use]
    pub const fn option_type(&self) -> Option<OptionType> {
        match self {
            Self::Option(side) => Some(*side),
            _ => None,
        }
    }

    /// Returns the broker code for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Option(side) => side.as_str(),
            Self::Future => "FUT",
            Self::Equity => "EQ",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InstrumentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "CE" => Self::Option(OptionType::Call),
            "PE" => Self::Option(OptionType::Put),
            "FUT" => Self::Future,
            "EQ" => Self::Equity,
            other => Self::Other(other.to_string()),
        })
    }
}

/// A tradable contract from the broker's instrument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Opaque broker token used for historical data requests.
    pub token: u64,
    /// Exchange trading symbol (e.g. "ABB25JUN5600CE").
    pub tradingsymbol: String,
    /// Underlying name (e.g. "ABB").
    pub name: String,
    /// Strike price; zero for non-options.
    pub strike: Decimal,
    /// Expiry date; `None` for equities.
    pub expiry: Option<NaiveDate>,
    /// Contract type.
    pub instrument_type: InstrumentType,
    /// Exchange code (e.g. "NFO").
    pub exchange: String,
    /// Contract lot size.
    pub lot_size: u32,
}

impl Instrument {
    /// Returns the option side, if this is an option.
    #[must_use]
    pub const fn option_type(&self) -> Option<OptionType> {
        self.instrument_type.option_type()
    }

    /// Returns the key identifying this contract in analysis output.
    #[must_use]
    pub fn key(&self) -> InstrumentKey {
        InstrumentKey {
            token: self.token,
            name: self.name.clone(),
            strike: self.strike,
            expiry: self.expiry,
            instrument_type: self.instrument_type.clone(),
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.tradingsymbol, self.token)
    }
}

/// The identifying fields of a contract carried alongside derived data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentKey {
    /// Broker token.
    pub token: u64,
    /// Underlying name.
    pub name: String,
    /// Strike price.
    pub strike: Decimal,
    /// Expiry date.
    pub expiry: Option<NaiveDate>,
    /// Contract type.
    pub instrument_type: InstrumentType,
}

impl InstrumentKey {
    /// Returns the expiry formatted as `YYYY-MM-DD`, or an empty string.
    #[must_use]
    pub fn expiry_label(&self) -> String {
        self.expiry
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
