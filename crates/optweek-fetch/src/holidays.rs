//! HTTP holiday sources.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use optweek_calendar::{HolidayError, HolidaySource, parse_holiday_page};
use optweek_types::{Holiday, HolidaySet};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::url::{HOLIDAY_PAGE_URL, NSE_HOLIDAY_URL};

/// Exchange sites reject clients that do not look like a browser.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Segment used when the configured one is missing from the feed.
const FALLBACK_SEGMENT: &str = "CM";

fn browser_client() -> Result<Client, HolidayError> {
    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(Duration::from_secs(20))
        .gzip(true)
        .build()
        .map_err(|e| HolidayError::Http(e.to_string()))
}

async fn fetch_text(client: &Client, url: &str, referer: Option<&str>) -> Result<String, HolidayError> {
    let mut request = client
        .get(url)
        .header("Accept-Language", "en-US,en;q=0.9");
    if let Some(referer) = referer {
        request = request.header("Referer", referer);
    }
    let response = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| HolidayError::Http(e.to_string()))?;
    response.text().await.map_err(|e| HolidayError::Http(e.to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NseHoliday {
    trading_date: String,
    #[serde(default)]
    week_day: String,
    #[serde(default)]
    description: String,
}

/// Parses the NSE holiday-master JSON for one segment and year.
///
/// Falls back to the capital market segment (`CM`) when `segment` is absent.
///
/// # Errors
///
/// Returns [`HolidayError::Parse`] if the body is not the expected JSON or
/// neither segment is present.
pub fn parse_nse_holidays(body: &str, year: i32, segment: &str) -> Result<HolidaySet, HolidayError> {
    let feed: HashMap<String, Vec<NseHoliday>> =
        serde_json::from_str(body).map_err(|e| HolidayError::Parse(e.to_string()))?;
    let entries = feed
        .get(segment)
        .or_else(|| feed.get(FALLBACK_SEGMENT))
        .ok_or_else(|| HolidayError::Parse(format!("no '{segment}' or '{FALLBACK_SEGMENT}' segment")))?;

    let holidays = entries.iter().filter_map(|entry| {
        let date = NaiveDate::parse_from_str(entry.trading_date.trim(), "%d-%b-%Y").ok()?;
        if date.year() != year {
            return None;
        }
        let mut holiday = Holiday::new(date, entry.description.trim());
        if !entry.week_day.is_empty() {
            holiday.day = entry.week_day.clone();
        }
        holiday.exchanges = segment.to_string();
        Some(holiday)
    });
    Ok(HolidaySet::from_holidays(year, holidays))
}

/// NSE holiday-master feed.
#[derive(Debug, Clone)]
pub struct NseHolidayFeed {
    client: Client,
    url: String,
    segment: String,
}

impl NseHolidayFeed {
    /// Creates a feed for the derivatives segment (`FO`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, HolidayError> {
        Self::with_url(NSE_HOLIDAY_URL, "FO")
    }

    /// Creates a feed reading `segment` from `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_url(url: impl Into<String>, segment: impl Into<String>) -> Result<Self, HolidayError> {
        Ok(Self {
            client: browser_client()?,
            url: url.into(),
            segment: segment.into(),
        })
    }
}

#[async_trait]
impl HolidaySource for NseHolidayFeed {
    fn name(&self) -> &str {
        "nse"
    }

    async fn fetch(&self, year: i32) -> Result<HolidaySet, HolidayError> {
        let body = fetch_text(&self.client, &self.url, None).await?;
        debug!(bytes = body.len(), "Fetched NSE holiday feed");
        parse_nse_holidays(&body, year, &self.segment)
    }
}

/// A holiday calendar web page.
#[derive(Debug, Clone)]
pub struct HolidayPage {
    client: Client,
    url: String,
}

impl HolidayPage {
    /// Creates a source for the default holiday calendar page.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, HolidayError> {
        Self::with_url(HOLIDAY_PAGE_URL)
    }

    /// Creates a source scraping `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_url(url: impl Into<String>) -> Result<Self, HolidayError> {
        Ok(Self {
            client: browser_client()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl HolidaySource for HolidayPage {
    fn name(&self) -> &str {
        "page"
    }

    async fn fetch(&self, year: i32) -> Result<HolidaySet, HolidayError> {
        let html = fetch_text(&self.client, &self.url, Some("https://zerodha.com/")).await?;
        parse_holiday_page(&html, year)
    }
}
