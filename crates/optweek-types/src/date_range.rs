//! Inclusive date range for historical requests.

use chrono::NaiveDate;

use crate::DateRangeError;

/// A range of dates for data retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a date range for a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns the total number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Returns true if the range contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns an iterator over every date in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_new() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(range.start, date(2025, 1, 1));
        assert_eq!(range.end, date(2025, 1, 31));
        assert_eq!(range.total_days(), 31);
    }

    #[test]
    fn test_date_range_invalid() {
        assert!(DateRange::new(date(2025, 1, 31), date(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_days_iterator() {
        let range = DateRange::new(date(2024, 12, 30), date(2025, 1, 2)).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], date(2024, 12, 30));
        assert_eq!(days[3], date(2025, 1, 2));
        assert!(range.contains(date(2025, 1, 1)));
        assert!(!range.contains(date(2025, 1, 3)));
    }
}
