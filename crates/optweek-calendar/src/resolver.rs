//! Trading-day resolution: weekday anchors and holiday adjustment.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::warn;

use crate::HolidayCalendar;

/// Most days [`adjust_for_holiday`] will step before giving up.
pub const MAX_HOLIDAY_STEPS: u32 = 10;

/// Direction in which a holiday is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Move to the next day. Used for week-open dates.
    Forward,
    /// Move to the previous day. Used for week-close dates.
    Backward,
}

impl Direction {
    fn step(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Forward => date.succ_opt(),
            Self::Backward => date.pred_opt(),
        }
    }
}

/// Returns the `n`-th most recent `weekday` on or before `today`.
///
/// `n = 1` is `today` itself when it falls on `weekday`; `n = 0` is treated
/// as `1`. Holidays are not considered.
#[must_use]
pub fn nth_prior_weekday(n: u32, weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let n = n.max(1);
    let days_since = (7 + today.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    let back = u64::from(days_since) + u64::from(n - 1) * 7;
    today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

/// Moves `date` off holidays in `direction`.
///
/// Returns `date` unchanged when it is not a holiday. Gives up after
/// [`MAX_HOLIDAY_STEPS`] steps and returns the unadjusted date.
#[must_use]
pub fn adjust_for_holiday(date: NaiveDate, direction: Direction, calendar: &HolidayCalendar) -> NaiveDate {
    let mut current = date;
    for _ in 0..MAX_HOLIDAY_STEPS {
        if !calendar.is_holiday(current) {
            return current;
        }
        match direction.step(current) {
            Some(next) => current = next,
            None => break,
        }
    }
    if !calendar.is_holiday(current) {
        return current;
    }

    warn!(
        %date,
        ?direction,
        max_steps = MAX_HOLIDAY_STEPS,
        "Holiday adjustment did not settle, using unadjusted date"
    );
    date
}

/// Returns true if `date` is a weekday and not a holiday.
#[must_use]
pub fn is_trading_day(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !calendar.is_holiday(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use optweek_types::{Holiday, HolidaySet};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(dates: &[NaiveDate]) -> HolidayCalendar {
        let holidays: Vec<Holiday> = dates.iter().map(|d| Holiday::new(*d, "closed")).collect();
        let mut years: Vec<i32> = dates.iter().map(|d| d.year()).collect();
        years.dedup();
        HolidayCalendar::from_sets(
            years
                .into_iter()
                .map(|y| HolidaySet::from_holidays(y, holidays.iter().cloned())),
        )
    }

    #[test]
    fn test_nth_prior_weekday_includes_today() {
        let wednesday = date(2025, 6, 18);
        assert_eq!(nth_prior_weekday(1, Weekday::Wed, wednesday), wednesday);
        assert_eq!(nth_prior_weekday(2, Weekday::Wed, wednesday), date(2025, 6, 11));
    }

    #[test]
    fn test_nth_prior_weekday_on_monday() {
        let monday = date(2025, 6, 16);
        assert_eq!(nth_prior_weekday(1, Weekday::Mon, monday), monday);
        assert_eq!(nth_prior_weekday(2, Weekday::Mon, monday), date(2025, 6, 9));
        assert_eq!(nth_prior_weekday(1, Weekday::Fri, monday), date(2025, 6, 13));
    }

    #[test]
    fn test_nth_prior_weekday_arithmetic() {
        let wednesday = date(2025, 6, 18);
        assert_eq!(nth_prior_weekday(1, Weekday::Mon, wednesday), date(2025, 6, 16));
        assert_eq!(nth_prior_weekday(3, Weekday::Mon, wednesday), date(2025, 6, 2));
        assert_eq!(nth_prior_weekday(1, Weekday::Fri, wednesday), date(2025, 6, 13));
        assert_eq!(nth_prior_weekday(2, Weekday::Fri, wednesday), date(2025, 6, 6));
    }

    #[test]
    fn test_nth_prior_weekday_zero_is_one() {
        let today = date(2025, 6, 18);
        assert_eq!(
            nth_prior_weekday(0, Weekday::Mon, today),
            nth_prior_weekday(1, Weekday::Mon, today)
        );
    }

    #[test]
    fn test_nth_prior_weekday_across_year() {
        assert_eq!(nth_prior_weekday(1, Weekday::Fri, date(2025, 1, 1)), date(2024, 12, 27));
    }

    #[test]
    fn test_adjust_without_holidays_is_identity() {
        let empty = HolidayCalendar::empty();
        let d = date(2025, 3, 14);
        assert_eq!(adjust_for_holiday(d, Direction::Forward, &empty), d);
        assert_eq!(adjust_for_holiday(d, Direction::Backward, &empty), d);
    }

    #[test]
    fn test_adjust_directions() {
        let cal = calendar(&[date(2025, 3, 14), date(2025, 3, 31)]);
        assert_eq!(
            adjust_for_holiday(date(2025, 3, 31), Direction::Forward, &cal),
            date(2025, 4, 1)
        );
        assert_eq!(
            adjust_for_holiday(date(2025, 3, 14), Direction::Backward, &cal),
            date(2025, 3, 13)
        );
    }

    #[test]
    fn test_adjust_consecutive_holidays() {
        let cal = calendar(&[date(2025, 10, 20), date(2025, 10, 21), date(2025, 10, 22)]);
        assert_eq!(
            adjust_for_holiday(date(2025, 10, 20), Direction::Forward, &cal),
            date(2025, 10, 23)
        );
        // Only holidays are skipped, not weekends.
        assert_eq!(
            adjust_for_holiday(date(2025, 10, 22), Direction::Backward, &cal),
            date(2025, 10, 19)
        );
    }

    #[test]
    fn test_adjust_crosses_year_boundary() {
        let cal = calendar(&[date(2024, 12, 31), date(2025, 1, 1)]);
        assert_eq!(
            adjust_for_holiday(date(2025, 1, 1), Direction::Backward, &cal),
            date(2024, 12, 30)
        );
    }

    #[test]
    fn test_adjust_cap_returns_unadjusted() {
        let start = date(2025, 11, 3);
        let run: Vec<NaiveDate> = start.iter_days().take(12).collect();
        let cal = calendar(&run);
        assert_eq!(adjust_for_holiday(start, Direction::Forward, &cal), start);
    }

    #[test]
    fn test_adjust_settles_at_cap() {
        let start = date(2025, 11, 3);
        let run: Vec<NaiveDate> = start.iter_days().take(10).collect();
        let cal = calendar(&run);
        assert_eq!(
            adjust_for_holiday(start, Direction::Forward, &cal),
            date(2025, 11, 13)
        );
    }

    #[test]
    fn test_adjust_idempotent() {
        let cal = calendar(&[date(2025, 3, 14), date(2025, 3, 13)]);
        let once = adjust_for_holiday(date(2025, 3, 14), Direction::Backward, &cal);
        assert_eq!(adjust_for_holiday(once, Direction::Backward, &cal), once);
    }

    #[test]
    fn test_is_trading_day() {
        let cal = calendar(&[date(2025, 3, 14)]);
        assert!(is_trading_day(date(2025, 3, 13), &cal));
        assert!(!is_trading_day(date(2025, 3, 14), &cal));
        assert!(!is_trading_day(date(2025, 3, 15), &cal));
        assert!(!is_trading_day(date(2025, 3, 16), &cal));
    }
}
