//! The two-week trading window under analysis.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{DateRange, WindowError};

/// Longest calendar distance between a week's open and close day.
const MAX_WEEK_SPAN_DAYS: i64 = 4;

/// Open and close trading days of "two weeks ago" (first) and "last week".
///
/// Always satisfies
/// `first_week_open <= first_week_close < last_week_open <= last_week_close`
/// with each week spanning at most four calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    first_week_open: NaiveDate,
    first_week_close: NaiveDate,
    last_week_open: NaiveDate,
    last_week_close: NaiveDate,
}

impl WeekWindow {
    /// Creates a window, validating the ordering invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`WindowError`] describing the first violated constraint.
    pub fn new(
        first_week_open: NaiveDate,
        first_week_close: NaiveDate,
        last_week_open: NaiveDate,
        last_week_close: NaiveDate,
    ) -> Result<Self, WindowError> {
        check_week("first", first_week_open, first_week_close)?;
        check_week("last", last_week_open, last_week_close)?;
        if first_week_close >= last_week_open {
            return Err(WindowError::Overlapping {
                first_close: first_week_close,
                last_open: last_week_open,
            });
        }
        Ok(Self {
            first_week_open,
            first_week_close,
            last_week_open,
            last_week_close,
        })
    }

    /// First trading day of the earlier week.
    #[must_use]
    pub const fn first_week_open(&self) -> NaiveDate {
        self.first_week_open
    }

    /// Last trading day of the earlier week.
    #[must_use]
    pub const fn first_week_close(&self) -> NaiveDate {
        self.first_week_close
    }

    /// First trading day of the later week.
    #[must_use]
    pub const fn last_week_open(&self) -> NaiveDate {
        self.last_week_open
    }

    /// Last trading day of the later week.
    #[must_use]
    pub const fn last_week_close(&self) -> NaiveDate {
        self.last_week_close
    }

    /// Returns the four dates newest first:
    /// `[last_week_close, last_week_open, first_week_close, first_week_open]`.
    #[must_use]
    pub const fn newest_first(&self) -> [NaiveDate; 4] {
        [
            self.last_week_close,
            self.last_week_open,
            self.first_week_close,
            self.first_week_open,
        ]
    }

    /// Returns the four dates in chronological order.
    #[must_use]
    pub const fn chronological(&self) -> [NaiveDate; 4] {
        [
            self.first_week_open,
            self.first_week_close,
            self.last_week_open,
            self.last_week_close,
        ]
    }

    /// Returns true if `date` is one of the four window dates.
    #[must_use]
    pub fn is_window_date(&self, date: NaiveDate) -> bool {
        self.chronological().contains(&date)
    }

    /// Returns the date range from the first open to the last close.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange {
            start: self.first_week_open,
            end: self.last_week_close,
        }
    }
}

impl std::fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} | {} - {}",
            self.first_week_open, self.first_week_close, self.last_week_open, self.last_week_close
        )
    }
}

fn check_week(week: &'static str, open: NaiveDate, close: NaiveDate) -> Result<(), WindowError> {
    if open > close {
        return Err(WindowError::InvertedWeek { week, open, close });
    }
    let days = (close - open).num_days();
    if days > MAX_WEEK_SPAN_DAYS {
        return Err(WindowError::TooWide {
            week,
            open,
            close,
            days,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_window() {
        let window = WeekWindow::new(
            date(2025, 6, 2),
            date(2025, 6, 6),
            date(2025, 6, 9),
            date(2025, 6, 13),
        )
        .unwrap();

        assert_eq!(
            window.newest_first(),
            [date(2025, 6, 13), date(2025, 6, 9), date(2025, 6, 6), date(2025, 6, 2)]
        );
        assert_eq!(window.range().total_days(), 12);
        assert!(window.is_window_date(date(2025, 6, 9)));
        assert!(!window.is_window_date(date(2025, 6, 10)));
    }

    #[test]
    fn test_inverted_week() {
        let err = WeekWindow::new(
            date(2025, 6, 9),
            date(2025, 6, 6),
            date(2025, 6, 16),
            date(2025, 6, 20),
        )
        .unwrap_err();
        assert!(matches!(err, WindowError::InvertedWeek { week: "first", .. }));
    }

    #[test]
    fn test_overlapping_weeks() {
        let err = WeekWindow::new(
            date(2025, 6, 2),
            date(2025, 6, 6),
            date(2025, 6, 6),
            date(2025, 6, 6),
        )
        .unwrap_err();
        assert!(matches!(err, WindowError::Overlapping { .. }));
    }

    #[test]
    fn test_too_wide() {
        let err = WeekWindow::new(
            date(2025, 5, 26),
            date(2025, 6, 6),
            date(2025, 6, 9),
            date(2025, 6, 13),
        )
        .unwrap_err();
        assert!(matches!(err, WindowError::TooWide { days: 11, .. }));
    }

    #[test]
    fn test_single_day_weeks_allowed() {
        assert!(
            WeekWindow::new(
                date(2025, 6, 6),
                date(2025, 6, 6),
                date(2025, 6, 9),
                date(2025, 6, 9),
            )
            .is_ok()
        );
    }
}
