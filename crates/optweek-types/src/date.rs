//! Market timezone anchoring.
//!
//! Every calendar date in optweek is a [`NaiveDate`] in the exchange's local
//! timezone. The conversion from an instant happens here and nowhere else.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Timezone of the exchange whose calendar drives the analysis.
pub const MARKET_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Returns the market-local calendar date of the given instant.
#[must_use]
pub fn market_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&MARKET_TZ).date_naive()
}

/// Returns today's date in the market timezone.
#[must_use]
pub fn market_today() -> NaiveDate {
    market_date(Utc::now())
}

/// Returns the market-local wall-clock time of the given instant.
#[must_use]
pub fn market_datetime(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&MARKET_TZ).naive_local()
}

/// Returns the current wall-clock time in the market timezone.
#[must_use]
pub fn market_now() -> NaiveDateTime {
    market_datetime(Utc::now())
}
