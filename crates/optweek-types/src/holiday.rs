//! Exchange holiday sets.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single exchange holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Holiday date.
    pub date: NaiveDate,
    /// Day label, usually the weekday name.
    pub day: String,
    /// Occasion (e.g. "Diwali Laxmi Pujan").
    pub description: String,
    /// Exchanges or segments closed, `"All"` when unspecified.
    pub exchanges: String,
}

impl Holiday {
    /// Creates a holiday closed on all exchanges, labelled with its weekday.
    #[must_use]
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            day: date.format("%A").to_string(),
            description: description.into(),
            exchanges: "All".to_string(),
        }
    }
}

/// The holidays of a single calendar year.
///
/// A set never changes after it is built. An empty set means no holidays are
/// known for the year, which is also what a failed load degrades to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HolidaySet {
    year: i32,
    holidays: BTreeMap<NaiveDate, Holiday>,
}

impl HolidaySet {
    /// Creates an empty set for the year.
    #[must_use]
    pub const fn empty(year: i32) -> Self {
        Self {
            year,
            holidays: BTreeMap::new(),
        }
    }

    /// Builds a set for `year`, dropping holidays that fall in another year.
    ///
    /// When two entries share a date the first one wins.
    #[must_use]
    pub fn from_holidays(year: i32, holidays: impl IntoIterator<Item = Holiday>) -> Self {
        let mut map = BTreeMap::new();
        for holiday in holidays {
            if holiday.date.year() == year {
                map.entry(holiday.date).or_insert(holiday);
            }
        }
        Self {
            year,
            holidays: map,
        }
    }

    /// Returns the year this set covers.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns true if the date is a holiday.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Returns the holiday on the given date.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&date)
    }

    /// Returns the number of holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if no holidays are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Returns the holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.holidays.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_holidays_filters_year() {
        let set = HolidaySet::from_holidays(
            2025,
            [
                Holiday::new(date(2025, 10, 21), "Diwali"),
                Holiday::new(date(2024, 11, 1), "Diwali"),
                Holiday::new(date(2025, 8, 15), "Independence Day"),
            ],
        );
        assert_eq!(set.year(), 2025);
        assert_eq!(set.len(), 2);
        assert!(set.contains(date(2025, 8, 15)));
        assert!(!set.contains(date(2024, 11, 1)));
    }

    #[test]
    fn test_iter_is_date_ordered() {
        let set = HolidaySet::from_holidays(
            2025,
            [
                Holiday::new(date(2025, 12, 25), "Christmas"),
                Holiday::new(date(2025, 1, 26), "Republic Day"),
            ],
        );
        let dates: Vec<_> = set.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![date(2025, 1, 26), date(2025, 12, 25)]);
    }

    #[test]
    fn test_holiday_defaults() {
        let holiday = Holiday::new(date(2025, 8, 15), "Independence Day");
        assert_eq!(holiday.day, "Friday");
        assert_eq!(holiday.exchanges, "All");
    }

    #[test]
    fn test_empty() {
        let set = HolidaySet::empty(2026);
        assert!(set.is_empty());
        assert_eq!(set.get(date(2026, 1, 26)), None);
    }
}
