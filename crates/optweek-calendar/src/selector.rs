//! Weekly window selection.
//!
//! The window is anchored on the Mondays and Fridays of the last two
//! completed trading weeks. How many Mondays and Fridays to count back
//! depends on the weekday of `today`, and the anchors are then moved off
//! holidays: opens forward, closes backward.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use optweek_types::{WeekWindow, WindowError};
use tracing::info;

use crate::{Direction, HolidayCalendar, adjust_for_holiday, nth_prior_weekday};

/// Calendar days before `today` that a window can reach, holiday steps
/// included.
const WINDOW_LOOKBACK_DAYS: u64 = 28;

/// How many Mondays and Fridays to count back for each week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCounts {
    /// Monday count for the earlier week.
    pub first_monday: u32,
    /// Monday count for the later week.
    pub last_monday: u32,
    /// Friday count for the earlier week.
    pub first_friday: u32,
    /// Friday count for the later week.
    pub last_friday: u32,
}

/// Rule choosing [`AnchorCounts`] from the weekday of `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorRule {
    /// Counts Mondays from the current week only once the week is over
    /// (Saturday and Sunday).
    #[default]
    WeekendShift,
    /// Counts Mondays from the current week on Sunday and Monday.
    ///
    /// On a Monday this selects a Monday after the matching Friday, and on a
    /// Saturday it spans two weeks, so selection fails on those days.
    MondayShift,
}

impl AnchorRule {
    /// Returns the counts used when `today` falls on `weekday`.
    #[must_use]
    pub const fn counts(self, weekday: Weekday) -> AnchorCounts {
        let recent_monday = match self {
            Self::WeekendShift => matches!(weekday, Weekday::Sat | Weekday::Sun),
            Self::MondayShift => matches!(weekday, Weekday::Mon | Weekday::Sun),
        };
        let (first_monday, last_monday) = if recent_monday { (2, 1) } else { (3, 2) };
        let (first_friday, last_friday) = if matches!(weekday, Weekday::Fri) { (3, 2) } else { (2, 1) };
        AnchorCounts {
            first_monday,
            last_monday,
            first_friday,
            last_friday,
        }
    }

    /// Returns the name accepted by [`FromStr`](std::str::FromStr).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeekendShift => "weekend",
            Self::MondayShift => "monday",
        }
    }
}

impl std::fmt::Display for AnchorRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnchorRule {
    type Err = AnchorRuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekend" | "weekend-shift" => Ok(Self::WeekendShift),
            "monday" | "monday-shift" => Ok(Self::MondayShift),
            _ => Err(AnchorRuleParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown anchor rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRuleParseError(String);

impl std::fmt::Display for AnchorRuleParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid anchor rule '{}', expected one of: weekend, monday", self.0)
    }
}

impl std::error::Error for AnchorRuleParseError {}

/// Selects the last two completed trading weeks before `today` using the
/// default [`AnchorRule`].
///
/// # Errors
///
/// Returns a [`WindowError`] if the adjusted dates break the window ordering,
/// which only happens when holidays swallow most of a week.
pub fn select_week_window(today: NaiveDate, calendar: &HolidayCalendar) -> Result<WeekWindow, WindowError> {
    select_week_window_with(today, calendar, AnchorRule::default())
}

/// Selects the window with an explicit [`AnchorRule`].
///
/// # Errors
///
/// Returns a [`WindowError`] if the selected dates break the window ordering.
pub fn select_week_window_with(
    today: NaiveDate,
    calendar: &HolidayCalendar,
    rule: AnchorRule,
) -> Result<WeekWindow, WindowError> {
    let counts = rule.counts(today.weekday());

    let prev_monday = nth_prior_weekday(counts.first_monday, Weekday::Mon, today);
    let last_monday = nth_prior_weekday(counts.last_monday, Weekday::Mon, today);
    let prev_friday = nth_prior_weekday(counts.first_friday, Weekday::Fri, today);
    let last_friday = nth_prior_weekday(counts.last_friday, Weekday::Fri, today);
    info!(
        %today,
        %rule,
        %prev_monday,
        %prev_friday,
        %last_monday,
        %last_friday,
        "Week anchors before holiday adjustment"
    );

    let first_week_open = adjust_for_holiday(prev_monday, Direction::Forward, calendar);
    let first_week_close = adjust_for_holiday(prev_friday, Direction::Backward, calendar);
    let last_week_open = adjust_for_holiday(last_monday, Direction::Forward, calendar);
    let last_week_close = adjust_for_holiday(last_friday, Direction::Backward, calendar);
    info!(
        %first_week_open,
        %first_week_close,
        %last_week_open,
        %last_week_close,
        "Week anchors after holiday adjustment"
    );

    WeekWindow::new(first_week_open, first_week_close, last_week_open, last_week_close)
}

/// Returns the calendar years a window selected on `today` can touch.
#[must_use]
pub fn window_years(today: NaiveDate) -> Vec<i32> {
    let earliest = today
        .checked_sub_days(Days::new(WINDOW_LOOKBACK_DAYS))
        .unwrap_or(today);
    (earliest.year()..=today.year()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use optweek_types::{Holiday, HolidaySet};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(fo: NaiveDate, fc: NaiveDate, lo: NaiveDate, lc: NaiveDate) -> WeekWindow {
        WeekWindow::new(fo, fc, lo, lc).unwrap()
    }

    fn nse_2025() -> HolidayCalendar {
        let holidays = [
            (date(2025, 2, 26), "Mahashivratri"),
            (date(2025, 3, 14), "Holi"),
            (date(2025, 3, 31), "Id-Ul-Fitr"),
            (date(2025, 4, 10), "Mahavir Jayanti"),
            (date(2025, 4, 14), "Ambedkar Jayanti"),
            (date(2025, 4, 18), "Good Friday"),
            (date(2025, 5, 1), "Maharashtra Day"),
            (date(2025, 8, 15), "Independence Day"),
            (date(2025, 8, 27), "Ganesh Chaturthi"),
            (date(2025, 10, 2), "Gandhi Jayanti"),
            (date(2025, 10, 21), "Diwali Laxmi Pujan"),
            (date(2025, 10, 22), "Balipratipada"),
            (date(2025, 11, 5), "Prakash Gurpurb"),
            (date(2025, 12, 25), "Christmas"),
        ];
        let set = HolidaySet::from_holidays(
            2025,
            holidays.iter().map(|(d, name)| Holiday::new(*d, *name)),
        );
        HolidayCalendar::from_sets([set])
    }

    #[test]
    fn test_midweek_window() {
        let w = select_week_window(date(2025, 6, 18), &HolidayCalendar::empty()).unwrap();
        assert_eq!(
            w,
            window(date(2025, 6, 2), date(2025, 6, 6), date(2025, 6, 9), date(2025, 6, 13))
        );
    }

    #[test]
    fn test_monday_window() {
        let w = select_week_window(date(2025, 6, 16), &HolidayCalendar::empty()).unwrap();
        assert_eq!(
            w,
            window(date(2025, 6, 2), date(2025, 6, 6), date(2025, 6, 9), date(2025, 6, 13))
        );
    }

    #[test]
    fn test_friday_excludes_current_week() {
        let w = select_week_window(date(2025, 6, 13), &HolidayCalendar::empty()).unwrap();
        assert_eq!(
            w,
            window(date(2025, 5, 26), date(2025, 5, 30), date(2025, 6, 2), date(2025, 6, 6))
        );
    }

    #[test]
    fn test_weekend_includes_finished_week() {
        let expected = window(date(2025, 6, 2), date(2025, 6, 6), date(2025, 6, 9), date(2025, 6, 13));
        let empty = HolidayCalendar::empty();
        assert_eq!(select_week_window(date(2025, 6, 14), &empty).unwrap(), expected);
        assert_eq!(select_week_window(date(2025, 6, 15), &empty).unwrap(), expected);
    }

    #[test]
    fn test_holiday_monday_opens_tuesday() {
        // 31 Mar 2025 (Monday) is a holiday.
        let w = select_week_window(date(2025, 4, 9), &nse_2025()).unwrap();
        assert_eq!(w.first_week_open(), date(2025, 3, 24));
        assert_eq!(w.last_week_open(), date(2025, 4, 1));
        assert_eq!(w.last_week_close(), date(2025, 4, 4));
    }

    #[test]
    fn test_holiday_friday_closes_thursday() {
        // 18 Apr 2025 (Friday) is a holiday.
        let w = select_week_window(date(2025, 4, 23), &nse_2025()).unwrap();
        assert_eq!(w.last_week_open(), date(2025, 4, 15));
        assert_eq!(w.last_week_close(), date(2025, 4, 17));
        assert_eq!(w.first_week_close(), date(2025, 4, 11));
    }

    #[test]
    fn test_monday_shift_matches_default_midweek() {
        let empty = HolidayCalendar::empty();
        let today = date(2025, 6, 18);
        assert_eq!(
            select_week_window_with(today, &empty, AnchorRule::MondayShift).unwrap(),
            select_week_window(today, &empty).unwrap()
        );
    }

    #[test]
    fn test_monday_shift_fails_on_monday_and_saturday() {
        let empty = HolidayCalendar::empty();
        let err = select_week_window_with(date(2025, 6, 16), &empty, AnchorRule::MondayShift).unwrap_err();
        assert!(matches!(err, WindowError::InvertedWeek { .. }));
        assert!(select_week_window_with(date(2025, 6, 14), &empty, AnchorRule::MondayShift).is_err());
    }

    #[test]
    fn test_anchor_counts() {
        let rule = AnchorRule::WeekendShift;
        assert_eq!(
            rule.counts(Weekday::Fri),
            AnchorCounts {
                first_monday: 3,
                last_monday: 2,
                first_friday: 3,
                last_friday: 2,
            }
        );
        assert_eq!(rule.counts(Weekday::Sun).last_monday, 1);
        assert_eq!(AnchorRule::MondayShift.counts(Weekday::Mon).last_monday, 1);
    }

    #[test]
    fn test_anchor_rule_from_str() {
        assert_eq!("weekend".parse::<AnchorRule>().unwrap(), AnchorRule::WeekendShift);
        assert_eq!("Monday".parse::<AnchorRule>().unwrap(), AnchorRule::MondayShift);
        assert!("tuesday".parse::<AnchorRule>().is_err());
    }

    #[test]
    fn test_window_years() {
        assert_eq!(window_years(date(2025, 6, 18)), vec![2025]);
        assert_eq!(window_years(date(2026, 1, 5)), vec![2025, 2026]);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let cal = nse_2025();
        let today = date(2025, 10, 29);
        assert_eq!(
            select_week_window(today, &cal).unwrap(),
            select_week_window(today, &cal).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_winvariant_without_holidays(offset in 0u64..3650) {
            let today = date(2020, 1, 1) + Days::new(offset);
            let w = select_week_window(today, &HolidayCalendar::empty()).unwrap();
            prop_assert!(w.first_week_open() <= w.first_week_close());
            prop_assert!(w.first_week_close() < w.last_week_open());
            prop_assert!(w.last_week_open() <= w.last_week_close());
            prop_assert!(w.last_week_close() < today);
            prop_assert_eq!(w.first_week_open().weekday(), Weekday::Mon);
            prop_assert_eq!(w.last_week_close().weekday(), Weekday::Fri);
        }

        #[test]
        fn prop_winvariant_with_sparse_holidays(offset in 0u64..365) {
            let cal = nse_2025();
            let today = date(2025, 1, 1) + Days::new(offset);
            let w = select_week_window(today, &cal).unwrap();
            for d in w.chronological() {
                prop_assert!(!cal.is_holiday(d));
            }
            prop_assert!(w.first_week_close() < w.last_week_open());
        }
    }
}
