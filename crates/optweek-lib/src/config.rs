//! Analysis run configuration.

use std::collections::HashSet;

use optweek_calendar::AnchorRule;
use optweek_types::{Interval, OptionType};

use crate::MIN_DAYS_TO_EXPIRY;

/// Settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Underlying symbols to scan.
    pub symbols: Vec<String>,
    /// Exchange whose instrument list holds the option contracts.
    pub exchange: String,
    /// Exchange the underlying's last traded price is quoted on.
    pub quote_exchange: String,
    /// Symbol whose contract calendar decides the expiry.
    pub reference_symbol: String,
    /// Option sides to analyse, in order.
    pub option_types: Vec<OptionType>,
    /// Maximum concurrent history downloads.
    pub concurrency: usize,
    /// Candle interval requested from the broker.
    pub interval: Interval,
    /// How "two weeks ago" is counted.
    pub anchor_rule: AnchorRule,
    /// See [`MIN_DAYS_TO_EXPIRY`].
    pub min_days_to_expiry: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            exchange: "NFO".to_string(),
            quote_exchange: "NSE".to_string(),
            reference_symbol: "ABB".to_string(),
            option_types: OptionType::all().to_vec(),
            concurrency: 3,
            interval: Interval::Day,
            anchor_rule: AnchorRule::default(),
            min_days_to_expiry: MIN_DAYS_TO_EXPIRY,
        }
    }
}

impl AnalysisConfig {
    /// Creates a configuration scanning `symbols` with default settings.
    ///
    /// Repeated symbols are dropped, keeping the first occurrence.
    #[must_use]
    pub fn new(symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut seen = HashSet::new();
        let symbols = symbols
            .into_iter()
            .map(Into::into)
            .filter(|symbol: &String| seen.insert(symbol.clone()))
            .collect();
        Self {
            symbols,
            ..Self::default()
        }
    }

    /// Restricts the run to the given option sides.
    #[must_use]
    pub fn with_option_types(mut self, option_types: Vec<OptionType>) -> Self {
        self.option_types = option_types;
        self
    }

    /// Sets the download concurrency.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the anchor rule.
    #[must_use]
    pub const fn with_anchor_rule(mut self, anchor_rule: AnchorRule) -> Self {
        self.anchor_rule = anchor_rule;
        self
    }

    /// Returns the quote key of `symbol` (e.g. `NSE:ABB`).
    #[must_use]
    pub fn quote_key(&self, symbol: &str) -> String {
        optweek_fetch::url::quote_key(&self.quote_exchange, symbol)
    }
}

/// Parses a symbol list, one symbol per line.
///
/// Blank lines and lines starting with `#` are ignored; symbols are trimmed
/// and upper-cased.
#[must_use]
pub fn parse_symbols(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .collect()
}
