//! Holidays from a local CSV sheet.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Datelike;
use optweek_types::{Holiday, HolidaySet};
use tracing::debug;

use crate::{HolidayError, HolidaySource, parse_holiday_date};

/// A CSV sheet with at least `Date` and `Description` columns.
///
/// Extra columns are ignored. The sheet may list several years.
#[derive(Debug, Clone)]
pub struct SheetSource {
    path: PathBuf,
}

impl SheetSource {
    /// Creates a source reading the sheet at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the sheet path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HolidaySource for SheetSource {
    fn name(&self) -> &str {
        "sheet"
    }

    async fn fetch(&self, year: i32) -> Result<HolidaySet, HolidayError> {
        let file = std::fs::File::open(&self.path)?;
        parse_sheet(file, year)
    }
}

/// Reads the holidays of `year` from CSV data.
///
/// Rows with an unreadable date are skipped.
///
/// # Errors
///
/// Returns an error if the data is not CSV or has no `Date` column.
pub fn parse_sheet<R: Read>(reader: R, year: i32) -> Result<HolidaySet, HolidayError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let find = |keys: &[&str]| {
        headers.iter().position(|h| {
            let h = h.to_lowercase();
            keys.iter().any(|k| h.contains(k))
        })
    };
    let date_col = find(&["date"]).ok_or_else(|| HolidayError::Parse("sheet has no Date column".to_string()))?;
    let desc_col = find(&["desc", "occasion", "holiday", "reason"]);

    let mut holidays = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let Some(date) = record.get(date_col).and_then(parse_holiday_date) else {
            debug!(row = ?record, "Skipping sheet row without a date");
            continue;
        };
        if date.year() != year {
            continue;
        }
        let description = desc_col.and_then(|i| record.get(i)).unwrap_or_default();
        holidays.push(Holiday::new(date, description));
    }

    Ok(HolidaySet::from_holidays(year, holidays))
}
