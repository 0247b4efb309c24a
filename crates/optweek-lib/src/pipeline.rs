//! The weekly analysis pass.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use futures::StreamExt;
use optweek_aggregate::{CandleQuartet, week_bars_for_window};
use optweek_calendar::{HolidayCalendar, select_week_window_with};
use optweek_fetch::{Broker, CandleBatch, candle_stream_resilient};
use optweek_format::{DailyRow, WeeklyRow};
use optweek_pattern::{Signal, classify};
use optweek_types::{Instrument, InstrumentKey, OptionType, WeekWindow};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{AnalysisConfig, AnalysisError, filter_option_strikes, select_expiry};

/// Progress events emitted while a run is in flight.
#[derive(Debug)]
pub enum Progress<'a> {
    /// Downloads for one option side are about to start.
    SideStarted {
        /// Option side.
        side: OptionType,
        /// Number of contracts to download.
        contracts: usize,
    },
    /// One contract's history arrived (possibly empty).
    Fetched(&'a CandleBatch),
    /// One option side is done.
    SideFinished {
        /// Option side.
        side: OptionType,
        /// Signals found for the side.
        signals: usize,
    },
}

/// Everything one option side produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Option side analysed.
    pub side: OptionType,
    /// Contracts selected for the side, by symbol then strike.
    pub contracts: Vec<Instrument>,
    /// Daily rows, one placeholder per contract without data.
    pub daily: Vec<DailyRow>,
    /// Window-bounded weekly bars.
    pub weekly: Vec<WeeklyRow>,
    /// Contracts that matched the bullish pattern.
    pub signals: Vec<Signal>,
    /// Contracts whose download failed.
    pub failed: usize,
}

impl AnalysisReport {
    const fn new(side: OptionType, contracts: Vec<Instrument>) -> Self {
        Self {
            side,
            contracts,
            daily: Vec::new(),
            weekly: Vec::new(),
            signals: Vec::new(),
            failed: 0,
        }
    }

    fn record(&mut self, batch: CandleBatch, window: &WeekWindow) {
        let CandleBatch {
            key,
            mut candles,
            had_error,
        } = batch;
        if had_error {
            self.failed += 1;
        }
        if candles.is_empty() {
            self.daily.push(DailyRow::placeholder(&key));
            return;
        }

        candles.sort_by_key(|c| c.date);
        self.daily
            .extend(candles.iter().map(|c| DailyRow::from_candle(&key, c)));
        self.weekly.extend(
            week_bars_for_window(&candles, window)
                .iter()
                .map(|bar| WeeklyRow::new(&key, bar)),
        );

        let token = key.token;
        match CandleQuartet::from_daily(key, &candles, window) {
            Some(quartet) => {
                if let Some(signal) = classify(&quartet) {
                    info!(side = %self.side, "{signal}");
                    self.signals.push(signal);
                }
            }
            None => debug!(token, "Window sessions incomplete, not classified"),
        }
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Trading window analysed.
    pub window: WeekWindow,
    /// Contract expiry analysed.
    pub expiry: NaiveDate,
    /// Full, unfiltered instrument list of the exchange.
    pub instruments: Vec<Instrument>,
    /// One report per configured option side.
    pub reports: Vec<AnalysisReport>,
}

impl AnalysisRun {
    /// Returns every signal of the run, calls first.
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.reports.iter().flat_map(|r| r.signals.iter())
    }
}

/// Runs the analysis for `today`.
///
/// # Errors
///
/// Fails if the window cannot be resolved, the instrument list cannot be
/// downloaded, or the reference symbol lists no expiry. Problems with single
/// symbols or contracts are logged and skipped.
pub async fn run_analysis<B>(
    broker: &B,
    calendar: &HolidayCalendar,
    config: &AnalysisConfig,
    today: NaiveDate,
) -> Result<AnalysisRun, AnalysisError>
where
    B: Broker + ?Sized,
{
    run_analysis_with(broker, calendar, config, today, |_| {}).await
}

/// Runs the analysis, reporting progress to `on_progress`.
///
/// # Errors
///
/// See [`run_analysis`].
pub async fn run_analysis_with<B, F>(
    broker: &B,
    calendar: &HolidayCalendar,
    config: &AnalysisConfig,
    today: NaiveDate,
    mut on_progress: F,
) -> Result<AnalysisRun, AnalysisError>
where
    B: Broker + ?Sized,
    F: FnMut(Progress<'_>),
{
    let window = select_week_window_with(today, calendar, config.anchor_rule)?;
    info!(%window, "Resolved trading window");

    let instruments = broker.instruments(&config.exchange).await?;
    info!(exchange = %config.exchange, count = instruments.len(), "Loaded instruments");

    let expiry = select_expiry(
        &instruments,
        &config.reference_symbol,
        today,
        config.min_days_to_expiry,
    )
    .ok_or_else(|| AnalysisError::NoExpiry {
        symbol: config.reference_symbol.clone(),
    })?;
    info!(%expiry, reference = %config.reference_symbol, "Selected expiry");

    let prices = last_prices(broker, config).await;

    let mut reports = Vec::with_capacity(config.option_types.len());
    for &side in &config.option_types {
        // A symbol listed twice must not fetch or report its contracts twice.
        let mut seen = HashSet::new();
        let contracts: Vec<Instrument> = config
            .symbols
            .iter()
            .filter_map(|symbol| prices.get(symbol).map(|ltp| (symbol, *ltp)))
            .flat_map(|(symbol, ltp)| {
                let selected = filter_option_strikes(&instruments, symbol, ltp, side, expiry);
                if selected.is_empty() {
                    debug!(%symbol, %side, %ltp, "No contracts beyond last price");
                }
                selected
            })
            .filter(|instrument| seen.insert(instrument.token))
            .collect();
        info!(%side, contracts = contracts.len(), "Analysing option side");

        on_progress(Progress::SideStarted {
            side,
            contracts: contracts.len(),
        });
        let report = analyze_side(broker, side, contracts, &window, config, &mut on_progress).await;
        if report.failed > 0 {
            warn!(%side, failed = report.failed, "Some contracts had no data");
        }
        on_progress(Progress::SideFinished {
            side,
            signals: report.signals.len(),
        });
        reports.push(report);
    }

    Ok(AnalysisRun {
        window,
        expiry,
        instruments,
        reports,
    })
}

/// Looks up the last traded price of every configured symbol.
///
/// Symbols whose lookup fails are missing from the result.
async fn last_prices<B>(broker: &B, config: &AnalysisConfig) -> HashMap<String, Decimal>
where
    B: Broker + ?Sized,
{
    let mut prices = HashMap::with_capacity(config.symbols.len());
    for symbol in &config.symbols {
        let key = config.quote_key(symbol);
        match broker.ltp(std::slice::from_ref(&key)).await {
            Ok(quotes) => match quotes.get(&key) {
                Some(price) => {
                    debug!(%symbol, %price, "Last traded price");
                    prices.insert(symbol.clone(), *price);
                }
                None => warn!(%symbol, "No last price quoted, skipping symbol"),
            },
            Err(e) => warn!(%symbol, error = %e, "Last price lookup failed, skipping symbol"),
        }
    }
    prices
}

async fn analyze_side<B, F>(
    broker: &B,
    side: OptionType,
    contracts: Vec<Instrument>,
    window: &WeekWindow,
    config: &AnalysisConfig,
    on_progress: &mut F,
) -> AnalysisReport
where
    B: Broker + ?Sized,
    F: FnMut(Progress<'_>),
{
    let keys: Vec<InstrumentKey> = contracts.iter().map(Instrument::key).collect();

    let mut batches: HashMap<u64, CandleBatch> = HashMap::with_capacity(keys.len());
    {
        let stream = candle_stream_resilient(
            broker,
            &keys,
            window.range(),
            config.interval,
            config.concurrency,
        );
        futures::pin_mut!(stream);
        while let Some(batch) = stream.next().await {
            on_progress(Progress::Fetched(&batch));
            batches.insert(batch.key.token, batch);
        }
    }

    // Downloads finish out of order; report in contract order.
    let mut report = AnalysisReport::new(side, contracts);
    for key in &keys {
        if let Some(batch) = batches.remove(&key.token) {
            report.record(batch, window);
        }
    }
    report
}
