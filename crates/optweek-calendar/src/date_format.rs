//! Lenient parsing of holiday dates.

use chrono::NaiveDate;

/// Formats tried, in order, when reading a holiday date.
pub const HOLIDAY_DATE_FORMATS: &[&str] = &["%d-%b-%Y", "%d %b %Y", "%b %d, %Y", "%d/%m/%Y", "%Y-%m-%d"];

/// Parses a holiday date written in any of [`HOLIDAY_DATE_FORMATS`].
///
/// Runs of whitespace are collapsed first. If the whole text does not parse,
/// every run of one to three consecutive words is tried, so surrounding text
/// such as a weekday name is ignored. Two-digit years come back as years
/// below 100 and are left for the caller to interpret.
#[must_use]
pub fn parse_holiday_date(text: &str) -> Option<NaiveDate> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let cleaned = words.join(" ");
    if let Some(date) = parse_exact(&cleaned) {
        return Some(date);
    }

    for len in (1..=3.min(words.len())).rev() {
        for window in words.windows(len) {
            let candidate = window.join(" ");
            let candidate = candidate.trim_matches(|c: char| matches!(c, '(' | ')' | ',' | ';'));
            if let Some(date) = parse_exact(candidate) {
                return Some(date);
            }
        }
    }
    None
}

fn parse_exact(text: &str) -> Option<NaiveDate> {
    HOLIDAY_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_all_formats() {
        assert_eq!(parse_holiday_date("26-Jan-2025"), Some(date(2025, 1, 26)));
        assert_eq!(parse_holiday_date("26 Jan 2025"), Some(date(2025, 1, 26)));
        assert_eq!(parse_holiday_date("Jan 26, 2025"), Some(date(2025, 1, 26)));
        assert_eq!(parse_holiday_date("26/01/2025"), Some(date(2025, 1, 26)));
        assert_eq!(parse_holiday_date("2025-01-26"), Some(date(2025, 1, 26)));
    }

    #[test]
    fn test_surrounding_text_and_whitespace() {
        assert_eq!(
            parse_holiday_date("  Sunday   26-Jan-2025 "),
            Some(date(2025, 1, 26))
        );
        assert_eq!(
            parse_holiday_date("26 Jan 2025 (Sunday)"),
            Some(date(2025, 1, 26))
        );
        assert_eq!(
            parse_holiday_date("2025-02-26 00:00:00"),
            Some(date(2025, 2, 26))
        );
    }

    #[test]
    fn test_two_digit_year_kept_small() {
        let parsed = parse_holiday_date("26-Jan-25").unwrap();
        assert!(chrono::Datelike::year(&parsed) < 100);
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_holiday_date("Diwali"), None);
        assert_eq!(parse_holiday_date(""), None);
    }
}
