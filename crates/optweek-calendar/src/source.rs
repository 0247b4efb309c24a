//! Holiday source abstraction.

use async_trait::async_trait;
use optweek_types::{Holiday, HolidaySet};
use thiserror::Error;
use tracing::{info, warn};

/// Errors a holiday source can report.
///
/// None of these reach the resolver: [`get_holidays`] turns them into an
/// empty set.
#[derive(Error, Debug)]
pub enum HolidayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response or file content could not be understood.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Local sheet could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Local sheet is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Every source in a fallback chain failed.
    #[error("all {0} holiday sources failed")]
    Exhausted(usize),
}

/// A supplier of exchange holidays.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Fetches the holidays of `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unreachable or its data is malformed.
    async fn fetch(&self, year: i32) -> Result<HolidaySet, HolidayError>;
}

/// Returns the holidays of `year`, or an empty set if the source fails.
///
/// Running without holiday knowledge is the degraded mode, never an error.
pub async fn get_holidays(source: &dyn HolidaySource, year: i32) -> HolidaySet {
    match source.fetch(year).await {
        Ok(set) => {
            info!(source = source.name(), year, count = set.len(), "Loaded holidays");
            set
        }
        Err(e) => {
            warn!(
                source = source.name(),
                year,
                error = %e,
                "Holiday source failed, continuing without holiday checks"
            );
            HolidaySet::empty(year)
        }
    }
}

/// In-memory holiday list.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidays {
    holidays: Vec<Holiday>,
}

impl StaticHolidays {
    /// Creates a source serving the given holidays.
    #[must_use]
    pub const fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }

    /// Creates a source that knows no holidays.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            holidays: Vec::new(),
        }
    }
}

#[async_trait]
impl HolidaySource for StaticHolidays {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, year: i32) -> Result<HolidaySet, HolidayError> {
        Ok(HolidaySet::from_holidays(year, self.holidays.iter().cloned()))
    }
}

/// Tries each source in order and returns the first successful answer.
pub struct FallbackSource {
    sources: Vec<Box<dyn HolidaySource>>,
}

impl FallbackSource {
    /// Creates a chain from the given sources, primary first.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn HolidaySource>>) -> Self {
        Self { sources }
    }
}

impl std::fmt::Debug for FallbackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("FallbackSource")
            .field("sources", &names)
            .finish()
    }
}

#[async_trait]
impl HolidaySource for FallbackSource {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn fetch(&self, year: i32) -> Result<HolidaySet, HolidayError> {
        for source in &self.sources {
            match source.fetch(year).await {
                Ok(set) => return Ok(set),
                Err(e) => {
                    warn!(source = source.name(), year, error = %e, "Holiday source failed, trying next");
                }
            }
        }
        Err(HolidayError::Exhausted(self.sources.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct Unreachable;

    #[async_trait]
    impl HolidaySource for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn fetch(&self, _year: i32) -> Result<HolidaySet, HolidayError> {
            Err(HolidayError::Http("connection refused".to_string()))
        }
    }

    fn republic_day() -> Holiday {
        Holiday::new(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap(), "Republic Day")
    }

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_failure_degrades_to_empty_set() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let set = get_holidays(&Unreachable, 2025).await;
        assert!(set.is_empty());
        assert_eq!(set.year(), 2025);

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("Holiday source failed"));
        assert!(output.contains("unreachable"));
        assert!(output.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_static_source_filters_year() {
        let source = StaticHolidays::new(vec![republic_day()]);
        assert_eq!(get_holidays(&source, 2025).await.len(), 1);
        assert!(get_holidays(&source, 2024).await.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_uses_next_source() {
        let chain = FallbackSource::new(vec![
            Box::new(Unreachable),
            Box::new(StaticHolidays::new(vec![republic_day()])),
        ]);
        let set = chain.fetch(2025).await.unwrap();
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_exhausted() {
        let chain = FallbackSource::new(vec![Box::new(Unreachable), Box::new(Unreachable)]);
        let err = chain.fetch(2025).await.unwrap_err();
        assert!(matches!(err, HolidayError::Exhausted(2)));
        assert!(get_holidays(&chain, 2025).await.is_empty());
    }
}
