//! Concurrent candle download.

use futures::stream::{self, Stream, StreamExt};
use optweek_types::{Candle, DateRange, InstrumentKey, Interval};
use tracing::{debug, warn};

use crate::Broker;

/// The candles downloaded for one instrument.
#[derive(Debug, Clone)]
pub struct CandleBatch {
    /// The instrument the candles belong to.
    pub key: InstrumentKey,
    /// Candles, oldest first.
    pub candles: Vec<Candle>,
    /// Whether the download failed and was skipped.
    pub had_error: bool,
}

impl CandleBatch {
    /// Creates a new candle batch.
    #[must_use]
    pub const fn new(key: InstrumentKey, candles: Vec<Candle>) -> Self {
        Self {
            key,
            candles,
            had_error: false,
        }
    }

    /// Creates an empty batch standing in for a failed download.
    #[must_use]
    pub const fn skipped_error(key: InstrumentKey) -> Self {
        Self {
            key,
            candles: Vec::new(),
            had_error: true,
        }
    }

    /// Returns true if the batch has no candles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Returns the number of candles in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candles.len()
    }

    /// Returns true if this batch had an error that was skipped.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }
}

/// Creates a stream downloading the candles of every instrument in `keys`.
///
/// At most `concurrency` requests are in flight; `1` downloads strictly one
/// after another. Batches arrive in completion order. A failed download is
/// logged and yields an empty batch with `had_error` set, so one bad
/// instrument never aborts the run.
pub fn candle_stream_resilient<'a, B>(
    broker: &'a B,
    keys: &'a [InstrumentKey],
    range: DateRange,
    interval: Interval,
    concurrency: usize,
) -> impl Stream<Item = CandleBatch> + 'a
where
    B: Broker + ?Sized,
{
    stream::iter(keys)
        .map(move |key| async move {
            match broker.historical_data(key.token, range, interval).await {
                Ok(candles) => {
                    debug!(token = key.token, count = candles.len(), "Fetched candles");
                    CandleBatch::new(key.clone(), candles)
                }
                Err(e) => {
                    warn!(
                        token = key.token,
                        name = %key.name,
                        strike = %key.strike,
                        error = %e,
                        "No candle data, recording placeholder"
                    );
                    CandleBatch::skipped_error(key.clone())
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use optweek_types::{Instrument, InstrumentType, OptionType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{FetchError, Profile};

    struct FlakyBroker;

    #[async_trait]
    impl Broker for FlakyBroker {
        async fn profile(&self) -> Result<Profile, FetchError> {
            Err(FetchError::MissingAccessToken)
        }

        async fn instruments(&self, _exchange: &str) -> Result<Vec<Instrument>, FetchError> {
            Ok(Vec::new())
        }

        async fn ltp(&self, _keys: &[String]) -> Result<HashMap<String, Decimal>, FetchError> {
            Ok(HashMap::new())
        }

        async fn historical_data(
            &self,
            token: u64,
            range: DateRange,
            _interval: Interval,
        ) -> Result<Vec<Candle>, FetchError> {
            if token == 2 {
                return Err(FetchError::ServerError { status: 500 });
            }
            Ok(range
                .days()
                .map(|d| Candle::new(d, dec!(1), dec!(2), dec!(1), dec!(2), 10))
                .collect())
        }
    }

    fn key(token: u64) -> InstrumentKey {
        InstrumentKey {
            token,
            name: "ABB".to_string(),
            strike: dec!(5600),
            expiry: NaiveDate::from_ymd_opt(2025, 6, 26),
            instrument_type: InstrumentType::Option(OptionType::Call),
        }
    }

    #[test]
    fn test_candle_batch_skipped_error() {
        let batch = CandleBatch::skipped_error(key(1));
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
        assert!(batch.had_error());
    }

    #[tokio::test]
    async fn test_failed_instrument_does_not_abort() {
        let keys = vec![key(1), key(2), key(3)];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
        )
        .unwrap();

        let mut batches: Vec<CandleBatch> =
            candle_stream_resilient(&FlakyBroker, &keys, range, Interval::Day, 2)
                .collect()
                .await;
        batches.sort_by_key(|b| b.key.token);

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 3);
        assert!(batches[1].had_error());
        assert!(batches[1].is_empty());
        assert!(!batches[2].had_error());
    }
}
