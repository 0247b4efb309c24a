//! Expiry and strike selection.

use chrono::NaiveDate;
use optweek_types::{Instrument, OptionType};
use rust_decimal::Decimal;

/// Expiries closer than this many days are skipped in favour of the next one.
pub const MIN_DAYS_TO_EXPIRY: i64 = 10;

/// Picks the contract expiry to analyse.
///
/// Looks at the distinct expiries listed for `reference_symbol` and takes the
/// nearest one, unless it is fewer than `min_days` days after `today` and a
/// later one exists. Returns `None` if the symbol has no dated contracts.
#[must_use]
pub fn select_expiry(
    instruments: &[Instrument],
    reference_symbol: &str,
    today: NaiveDate,
    min_days: i64,
) -> Option<NaiveDate> {
    let mut expiries: Vec<NaiveDate> = instruments
        .iter()
        .filter(|i| i.name == reference_symbol)
        .filter_map(|i| i.expiry)
        .collect();
    expiries.sort_unstable();
    expiries.dedup();

    let nearest = *expiries.first()?;
    match expiries.get(1) {
        Some(next) if (nearest - today).num_days() < min_days => Some(*next),
        _ => Some(nearest),
    }
}

/// Returns the out-of-the-money contracts of `symbol` for one side.
///
/// Calls keep strikes strictly above `ltp`, puts strictly below. Only
/// contracts expiring on `expiry` are kept, sorted by strike.
#[must_use]
pub fn filter_option_strikes(
    instruments: &[Instrument],
    symbol: &str,
    ltp: Decimal,
    side: OptionType,
    expiry: NaiveDate,
) -> Vec<Instrument> {
    let mut selected: Vec<Instrument> = instruments
        .iter()
        .filter(|i| i.name == symbol && i.expiry == Some(expiry) && i.option_type() == Some(side))
        .filter(|i| match side {
            OptionType::Call => i.strike > ltp,
            OptionType::Put => i.strike < ltp,
        })
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.strike.cmp(&b.strike).then(a.token.cmp(&b.token)));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use optweek_types::InstrumentType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn option(token: u64, name: &str, strike: Decimal, expiry: NaiveDate, side: OptionType) -> Instrument {
        Instrument {
            token,
            tradingsymbol: format!("{name}{strike}{side}"),
            name: name.to_string(),
            strike,
            expiry: Some(expiry),
            instrument_type: InstrumentType::Option(side),
            exchange: "NFO".to_string(),
            lot_size: 125,
        }
    }

    fn chain() -> Vec<Instrument> {
        let june = date(2025, 6, 26);
        let july = date(2025, 7, 31);
        vec![
            option(1, "ABB", dec!(5700), june, OptionType::Call),
            option(2, "ABB", dec!(5600), june, OptionType::Call),
            option(3, "ABB", dec!(5500), june, OptionType::Call),
            option(4, "ABB", dec!(5500), june, OptionType::Put),
            option(5, "ABB", dec!(5400), june, OptionType::Put),
            option(6, "ABB", dec!(5800), july, OptionType::Call),
            option(7, "TCS", dec!(4000), june, OptionType::Call),
        ]
    }

    #[test]
    fn test_nearest_expiry_when_far_enough() {
        assert_eq!(
            select_expiry(&chain(), "ABB", date(2025, 6, 10), MIN_DAYS_TO_EXPIRY),
            Some(date(2025, 6, 26))
        );
    }

    #[test]
    fn test_next_expiry_when_too_close() {
        assert_eq!(
            select_expiry(&chain(), "ABB", date(2025, 6, 18), MIN_DAYS_TO_EXPIRY),
            Some(date(2025, 7, 31))
        );
    }

    #[test]
    fn test_only_expiry_kept_even_when_close() {
        assert_eq!(
            select_expiry(&chain(), "TCS", date(2025, 6, 24), MIN_DAYS_TO_EXPIRY),
            Some(date(2025, 6, 26))
        );
    }

    #[test]
    fn test_unknown_reference_symbol() {
        assert_eq!(select_expiry(&chain(), "XYZ", date(2025, 6, 10), MIN_DAYS_TO_EXPIRY), None);
    }

    #[test]
    fn test_call_strikes_above_ltp() {
        let calls = filter_option_strikes(&chain(), "ABB", dec!(5500), OptionType::Call, date(2025, 6, 26));
        let strikes: Vec<Decimal> = calls.iter().map(|i| i.strike).collect();
        assert_eq!(strikes, vec![dec!(5600), dec!(5700)]);
    }

    #[test]
    fn test_put_strikes_below_ltp() {
        let puts = filter_option_strikes(&chain(), "ABB", dec!(5500), OptionType::Put, date(2025, 6, 26));
        let tokens: Vec<u64> = puts.iter().map(|i| i.token).collect();
        assert_eq!(tokens, vec![5]);
    }

    #[test]
    fn test_other_expiry_excluded() {
        let calls = filter_option_strikes(&chain(), "ABB", dec!(5000), OptionType::Call, date(2025, 7, 31));
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].token, 6);
    }
}
