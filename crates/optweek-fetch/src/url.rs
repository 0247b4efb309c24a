//! Broker and holiday feed URL construction.

use optweek_types::{DateRange, Interval};

/// Base URL of the Kite Connect REST API.
pub const API_BASE_URL: &str = "https://api.kite.trade";

/// Interactive login page.
pub const LOGIN_URL: &str = "https://kite.zerodha.com/connect/login";

/// NSE holiday-master JSON feed.
pub const NSE_HOLIDAY_URL: &str = "https://www.nseindia.com/api/holiday-master?type=trading";

/// Zerodha holiday calendar page.
pub const HOLIDAY_PAGE_URL: &str = "https://zerodha.com/marketintel/holiday-calendar/";

/// API version sent in the `X-Kite-Version` header.
pub const API_VERSION: &str = "3";

/// Path of the user profile endpoint.
pub const PROFILE_PATH: &str = "/user/profile";

/// Path of the session token endpoint.
pub const SESSION_TOKEN_PATH: &str = "/session/token";

/// Path of the last traded price endpoint.
pub const LTP_PATH: &str = "/quote/ltp";

/// Builds the login URL the user opens to obtain a request token.
///
/// # Example
///
/// ```
/// use optweek_fetch::url::{LOGIN_URL, login_url};
///
/// assert_eq!(
///     login_url(LOGIN_URL, "abc123"),
///     "https://kite.zerodha.com/connect/login?v=3&api_key=abc123"
/// );
/// ```
#[must_use]
pub fn login_url(base: &str, api_key: &str) -> String {
    format!("{base}?v={API_VERSION}&api_key={api_key}")
}

/// Path of the instrument dump for an exchange.
#[must_use]
pub fn instruments_path(exchange: &str) -> String {
    format!("/instruments/{}", exchange.to_uppercase())
}

/// Path of the historical candle endpoint.
#[must_use]
pub fn historical_path(token: u64, interval: Interval) -> String {
    format!("/instruments/historical/{token}/{}", interval.as_str())
}

/// Query parameters of a historical request covering every session in
/// `range`, open interest included.
#[must_use]
pub fn historical_query(range: DateRange) -> Vec<(&'static str, String)> {
    vec![
        ("from", format!("{} 00:00:00", range.start.format("%Y-%m-%d"))),
        ("to", format!("{} 23:59:59", range.end.format("%Y-%m-%d"))),
        ("continuous", "0".to_string()),
        ("oi", "1".to_string()),
    ]
}

/// Instrument key used by quote endpoints, e.g. `NSE:ABB`.
#[must_use]
pub fn quote_key(exchange: &str, symbol: &str) -> String {
    format!("{}:{}", exchange.to_uppercase(), symbol.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_historical_path() {
        assert_eq!(
            historical_path(12_345, Interval::Day),
            "/instruments/historical/12345/day"
        );
        assert_eq!(
            historical_path(7, Interval::Minute15),
            "/instruments/historical/7/15minute"
        );
    }

    #[test]
    fn test_historical_query_covers_whole_days() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
        )
        .unwrap();
        let query = historical_query(range);
        assert_eq!(query[0], ("from", "2025-06-02 00:00:00".to_string()));
        assert_eq!(query[1], ("to", "2025-06-13 23:59:59".to_string()));
        assert!(query.contains(&("oi", "1".to_string())));
    }

    #[test]
    fn test_instruments_path_and_quote_key() {
        assert_eq!(instruments_path("nfo"), "/instruments/NFO");
        assert_eq!(quote_key("nse", "abb"), "NSE:ABB");
    }
}
