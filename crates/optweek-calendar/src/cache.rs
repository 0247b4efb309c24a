//! Per-run holiday cache.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use optweek_types::HolidaySet;
use tracing::trace;

use crate::{HolidaySource, get_holidays};

/// Holiday sets keyed by year, loaded once per run.
///
/// Lookups against a year that was never loaded answer "not a holiday".
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    years: BTreeMap<i32, HolidaySet>,
}

impl HolidayCalendar {
    /// Creates a calendar with no holidays.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    /// Creates a calendar from pre-built sets. Later sets replace earlier ones
    /// for the same year.
    #[must_use]
    pub fn from_sets(sets: impl IntoIterator<Item = HolidaySet>) -> Self {
        let years = sets.into_iter().map(|set| (set.year(), set)).collect();
        Self { years }
    }

    /// Loads every requested year from `source`.
    ///
    /// A year whose load fails is cached as empty.
    pub async fn load(source: &dyn HolidaySource, years: impl IntoIterator<Item = i32>) -> Self {
        let mut calendar = Self::empty();
        for year in years {
            if calendar.years.contains_key(&year) {
                continue;
            }
            let set = get_holidays(source, year).await;
            calendar.years.insert(year, set);
        }
        calendar
    }

    /// Returns the cached set for `year`.
    #[must_use]
    pub fn holidays(&self, year: i32) -> Option<&HolidaySet> {
        self.years.get(&year)
    }

    /// Returns true if `date` is a known holiday.
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        match self.years.get(&date.year()) {
            Some(set) => set.contains(date),
            None => {
                trace!(%date, "Year not loaded, treating as trading day");
                false
            }
        }
    }

    /// Returns the loaded years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticHolidays;
    use optweek_types::Holiday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_calendar() {
        let calendar = HolidayCalendar::empty();
        assert!(!calendar.is_holiday(date(2025, 1, 26)));
        assert_eq!(calendar.years().count(), 0);
    }

    #[test]
    fn test_from_sets() {
        let set = HolidaySet::from_holidays(2025, [Holiday::new(date(2025, 3, 14), "Holi")]);
        let calendar = HolidayCalendar::from_sets([set]);
        assert!(calendar.is_holiday(date(2025, 3, 14)));
        assert!(!calendar.is_holiday(date(2025, 3, 13)));
        assert!(!calendar.is_holiday(date(2024, 3, 14)));
        assert_eq!(calendar.holidays(2025).map(HolidaySet::len), Some(1));
    }

    #[tokio::test]
    async fn test_load_spans_years() {
        let source = StaticHolidays::new(vec![
            Holiday::new(date(2024, 12, 25), "Christmas"),
            Holiday::new(date(2025, 1, 26), "Republic Day"),
        ]);
        let calendar = HolidayCalendar::load(&source, [2024, 2025, 2025]).await;
        assert_eq!(calendar.years().collect::<Vec<_>>(), vec![2024, 2025]);
        assert!(calendar.is_holiday(date(2024, 12, 25)));
        assert!(calendar.is_holiday(date(2025, 1, 26)));
    }
}
