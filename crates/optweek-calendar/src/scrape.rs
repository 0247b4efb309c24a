//! HTML holiday calendar scraper.
//!
//! Holiday pages publish one table per year under a heading naming the year.
//! Column order and header wording vary between publishers, so headers are
//! mapped onto the canonical `Date, Day, Description, Exchanges` fields by
//! keyword.

use chrono::{Datelike, NaiveDate};
use optweek_types::{Holiday, HolidaySet};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::{HolidayError, parse_holiday_date};

/// Headers assumed when a table has none.
const DEFAULT_HEADERS: [&str; 4] = ["Date", "Day", "Description", "Exchanges"];

/// Number of leading characters searched for the year in an unlabelled table.
const TABLE_PREVIEW_CHARS: usize = 100;

/// Canonical holiday field a column maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Day,
    Description,
    Exchanges,
    Other,
}

impl Field {
    fn from_header(header: &str) -> Self {
        let header = header.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| header.contains(k));
        // Description first: "Holiday" also contains "day".
        if has(&["desc", "occasion", "holiday", "reason"]) {
            Self::Description
        } else if has(&["day", "week"]) {
            Self::Day
        } else if has(&["exchange", "market"]) {
            Self::Exchanges
        } else {
            Self::Other
        }
    }
}

/// Extracts the holidays of `year` from a holiday calendar page.
///
/// Returns an empty set when the page has no table for the year.
///
/// # Errors
///
/// Returns [`HolidayError::Parse`] only if the internal CSS selectors are
/// rejected by the HTML parser.
pub fn parse_holiday_page(html: &str, year: i32) -> Result<HolidaySet, HolidayError> {
    let document = Html::parse_document(html);
    let Some(table) = find_year_table(&document, year)? else {
        warn!(year, "Could not find holiday table");
        return Ok(HolidaySet::empty(year));
    };

    let row_selector = selector("tr")?;
    let cell_selector = selector("td, th")?;
    let rows: Vec<ElementRef<'_>> = table.select(&row_selector).collect();

    let thead_headers: Vec<String> = table
        .select(&selector("thead th")?)
        .map(cell_text)
        .collect();
    let (headers, skip_first) = if !thead_headers.is_empty() {
        (thead_headers, true)
    } else if let Some(first) = rows.first() {
        let first_cells: Vec<String> = first.select(&cell_selector).map(cell_text).collect();
        if first_cells.is_empty() {
            (default_headers(), false)
        } else {
            (first_cells, true)
        }
    } else {
        (default_headers(), false)
    };

    let mut holidays = Vec::new();
    for row in rows.iter().skip(usize::from(skip_first)) {
        let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
        if cells.len() < 3 {
            continue;
        }
        if let Some(holiday) = holiday_from_row(&headers, &cells, year) {
            holidays.push(holiday);
        }
    }

    debug!(year, count = holidays.len(), "Parsed holiday table");
    Ok(HolidaySet::from_holidays(year, holidays))
}

/// Finds the first table after a heading naming `year`, or failing that the
/// first table whose opening text names it.
fn find_year_table(document: &Html, year: i32) -> Result<Option<ElementRef<'_>>, HolidayError> {
    let year_text = year.to_string();
    let in_order = selector("h1, h2, h3, h4, h5, h6, table")?;

    let mut heading_seen = false;
    for element in document.select(&in_order) {
        if element.value().name() == "table" {
            if heading_seen {
                return Ok(Some(element));
            }
        } else if !heading_seen && cell_text(element).contains(&year_text) {
            heading_seen = true;
        }
    }
    if heading_seen {
        debug!(year, "Year heading has no table after it");
    }

    let tables = selector("table")?;
    Ok(document.select(&tables).find(|table| {
        let preview: String = table.text().collect::<String>().chars().take(TABLE_PREVIEW_CHARS).collect();
        preview.contains(&year_text)
    }))
}

fn holiday_from_row(headers: &[String], cells: &[String], year: i32) -> Option<Holiday> {
    let Some(mut date) = parse_holiday_date(&cells[0]) else {
        debug!(text = %cells[0], "Could not parse holiday date");
        return None;
    };

    if date.year() != year {
        if date.year() < 100 {
            date = NaiveDate::from_ymd_opt(year, date.month(), date.day())?;
        } else {
            return None;
        }
    }

    let mut day = None;
    let mut description = None;
    let mut exchanges = None;
    for (i, value) in cells.iter().enumerate().skip(1) {
        let field = headers.get(i).map_or(Field::Other, |h| Field::from_header(h));
        match field {
            Field::Day => day = Some(value.clone()),
            Field::Description => description = Some(value.clone()),
            Field::Exchanges => exchanges = Some(value.clone()),
            Field::Other => {}
        }
    }

    Some(Holiday {
        date,
        day: day.unwrap_or_else(|| date.format("%A").to_string()),
        description: description.unwrap_or_else(|| cells[1].clone()),
        exchanges: exchanges.unwrap_or_else(|| "All".to_string()),
    })
}

fn default_headers() -> Vec<String> {
    DEFAULT_HEADERS.iter().map(|h| (*h).to_string()).collect()
}

fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn selector(css: &str) -> Result<Selector, HolidayError> {
    Selector::parse(css).map_err(|e| HolidayError::Parse(format!("invalid selector '{css}': {e}")))
}
