//! Broker abstraction.

use std::collections::HashMap;

use async_trait::async_trait;
use optweek_types::{Candle, DateRange, Instrument, Interval};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Account profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Broker user id.
    pub user_id: String,
    /// Display name.
    #[serde(default)]
    pub user_name: String,
    /// Registered email address.
    #[serde(default)]
    pub email: String,
}

/// The brokerage data source the analysis runs against.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Returns the profile of the authenticated user.
    async fn profile(&self) -> Result<Profile, FetchError>;

    /// Returns every instrument listed on `exchange` (e.g. `NFO`).
    async fn instruments(&self, exchange: &str) -> Result<Vec<Instrument>, FetchError>;

    /// Returns the last traded price for each `EXCHANGE:SYMBOL` key.
    ///
    /// Keys the broker does not know are absent from the result.
    async fn ltp(&self, keys: &[String]) -> Result<HashMap<String, Decimal>, FetchError>;

    /// Returns the candles of `token` within `range`, oldest first.
    async fn historical_data(
        &self,
        token: u64,
        range: DateRange,
        interval: Interval,
    ) -> Result<Vec<Candle>, FetchError>;
}
