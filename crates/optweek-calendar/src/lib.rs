//! Trading calendar for the optweek options scanner.
//!
//! This crate resolves which calendar dates to analyse:
//!
//! - [`HolidaySource`] - Pluggable supplier of a year's exchange holidays
//! - [`parse_holiday_page`] - HTML holiday table scraper
//! - [`HolidayCalendar`] - Per-run cache of holiday sets by year
//! - [`nth_prior_weekday`] / [`adjust_for_holiday`] - Trading-day resolver
//! - [`select_week_window`] - Open/close days of the last two completed weeks
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use optweek_calendar::{HolidayCalendar, select_week_window};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
//! let window = select_week_window(today, &HolidayCalendar::empty()).unwrap();
//! assert_eq!(window.first_week_open(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
//! assert_eq!(window.last_week_close(), NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod date_format;
mod resolver;
mod scrape;
mod selector;
mod sheet;
mod source;

pub use cache::HolidayCalendar;
pub use date_format::{HOLIDAY_DATE_FORMATS, parse_holiday_date};
pub use resolver::{Direction, MAX_HOLIDAY_STEPS, adjust_for_holiday, is_trading_day, nth_prior_weekday};
pub use scrape::parse_holiday_page;
pub use selector::{
    AnchorCounts, AnchorRule, AnchorRuleParseError, select_week_window, select_week_window_with,
    window_years,
};
pub use sheet::{SheetSource, parse_sheet};
pub use source::{FallbackSource, HolidayError, HolidaySource, StaticHolidays, get_holidays};
