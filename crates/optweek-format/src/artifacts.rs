//! Names of the files a run writes.

use chrono::NaiveDateTime;
use optweek_types::OptionType;

/// Timestamp format embedded in artifact names.
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%d-%b-%Y %H-%M-%S";

/// Default artifact name prefix.
pub const DEFAULT_PREFIX: &str = "zerodha_NFO";

/// Builds the file names of one run.
///
/// All names share the run's timestamp so files from the same run sort
/// together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    prefix: String,
    timestamp: String,
    extension: String,
}

impl ArtifactNames {
    /// Creates names for a run started at `started`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, started: NaiveDateTime, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            timestamp: started.format(ARTIFACT_TIMESTAMP_FORMAT).to_string(),
            extension: extension.into(),
        }
    }

    /// Returns the formatted run timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Full unfiltered instrument list.
    #[must_use]
    pub fn original(&self) -> String {
        format!("{}_original_{}.{}", self.prefix, self.timestamp, self.extension)
    }

    /// Filtered contracts of one option side.
    #[must_use]
    pub fn options(&self, side: OptionType) -> String {
        self.filtered(side, "options")
    }

    /// Daily OHLC rows of one option side.
    #[must_use]
    pub fn daily(&self, side: OptionType) -> String {
        self.filtered(side, "daily_OHLC")
    }

    /// Weekly OHLC rows of one option side.
    #[must_use]
    pub fn weekly(&self, side: OptionType) -> String {
        self.filtered(side, "weekly_OHLC")
    }

    /// Signal lines of one option side.
    #[must_use]
    pub fn results(side: OptionType) -> String {
        format!("{side}_Analysis.txt")
    }

    fn filtered(&self, side: OptionType, kind: &str) -> String {
        format!(
            "{}_filtered_{side}_{kind}_{}.{}",
            self.prefix, self.timestamp, self.extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn names() -> ArtifactNames {
        let started = NaiveDate::from_ymd_opt(2025, 6, 18)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap();
        ArtifactNames::new(DEFAULT_PREFIX, started, "csv")
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(names().timestamp(), "18-Jun-2025 09-05-30");
    }

    #[test]
    fn test_artifact_names() {
        let names = names();
        assert_eq!(names.original(), "zerodha_NFO_original_18-Jun-2025 09-05-30.csv");
        assert_eq!(
            names.options(OptionType::Call),
            "zerodha_NFO_filtered_CE_options_18-Jun-2025 09-05-30.csv"
        );
        assert_eq!(
            names.daily(OptionType::Put),
            "zerodha_NFO_filtered_PE_daily_OHLC_18-Jun-2025 09-05-30.csv"
        );
        assert_eq!(
            names.weekly(OptionType::Call),
            "zerodha_NFO_filtered_CE_weekly_OHLC_18-Jun-2025 09-05-30.csv"
        );
        assert_eq!(ArtifactNames::results(OptionType::Put), "PE_Analysis.txt");
    }
}
