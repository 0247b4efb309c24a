//! Detected pattern signal.

use optweek_types::InstrumentKey;
use serde::Serialize;

/// A bullish continuation detected for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    /// The instrument that matched.
    pub key: InstrumentKey,
}

impl Signal {
    /// Creates a signal for the instrument.
    #[must_use]
    pub const fn new(key: InstrumentKey) -> Self {
        Self { key }
    }

    /// Returns the results-file line for this signal.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "***** GREEN bullish ****** {}, {}, {} ***** ",
            self.key.name,
            self.key.strike.normalize(),
            self.key.expiry_label()
        )
    }
}
