//! Analyze command implementation.
//!
//! Resolves the trading window, scans the option chains of the requested
//! symbols and writes the instrument, OHLC and results files.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use optweek_lib::{
    AnalysisConfig, Broker, OutputFormat, Progress, parse_symbols, run_analysis_with, write_run,
};
use std::path::PathBuf;
use tracing::info;

use crate::commands::{load_calendar, login::authenticate};
use crate::display::{Format, Side, progress_bar};
use crate::{HolidayArgs, KiteArgs};

/// Options of the analyze command.
pub(crate) struct AnalyzeOptions {
    pub(crate) symbols: Vec<String>,
    pub(crate) symbols_file: Option<PathBuf>,
    pub(crate) side: Side,
    pub(crate) reference_symbol: String,
    pub(crate) output_dir: PathBuf,
    pub(crate) format: Format,
    pub(crate) concurrency: usize,
    pub(crate) holidays: HolidayArgs,
    pub(crate) kite: KiteArgs,
    pub(crate) today: NaiveDate,
    pub(crate) quiet: bool,
}

/// Run the weekly analysis.
pub(crate) async fn analyze(options: AnalyzeOptions) -> Result<()> {
    let symbols = collect_symbols(&options.symbols, options.symbols_file.as_ref())?;
    if symbols.is_empty() {
        bail!("No symbols given; use --symbol or --symbols-file");
    }

    let client = authenticate(&options.kite).await?;
    let profile = client.profile().await.context("Failed to fetch profile")?;
    info!(user_id = %profile.user_id, user_name = %profile.user_name, "Authenticated");

    let calendar = load_calendar(&options.holidays, options.today).await?;

    let mut config = AnalysisConfig::new(symbols)
        .with_option_types(options.side.option_types())
        .with_concurrency(options.concurrency)
        .with_anchor_rule(options.holidays.anchor_rule);
    config.reference_symbol = options.reference_symbol;

    let started = optweek_lib::market_now();
    let progress = progress_bar(options.quiet);
    let run = run_analysis_with(&client, &calendar, &config, options.today, |event| match event {
        Progress::SideStarted { side, contracts } => {
            progress.reset();
            progress.set_length(contracts as u64);
            progress.set_message(format!("{side}"));
        }
        Progress::Fetched(batch) => {
            if batch.had_error() {
                progress.set_message(format!("no data for {} {}", batch.key.name, batch.key.strike));
            }
            progress.inc(1);
        }
        Progress::SideFinished { side, signals } => {
            progress.finish_with_message(format!("{side}: {signals} signals"));
        }
    })
    .await
    .context("Analysis failed")?;

    let format = OutputFormat::from(options.format);
    let written = write_run(&run, &options.output_dir, format, started)
        .with_context(|| format!("Failed to write output to {}", options.output_dir.display()))?;

    if !options.quiet {
        println!("Window: {}", run.window);
        println!("Expiry: {}", run.expiry);
        for report in &run.reports {
            println!(
                "{}: {} contracts, {} without data, {} signals",
                report.side,
                report.contracts.len(),
                report.failed,
                report.signals.len()
            );
        }
        println!();
        for signal in run.signals() {
            println!("{signal}");
        }
        println!("\nOutput written to: {}", options.output_dir.display());
        for path in &written {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

/// Merges `--symbol` values with the symbols file, keeping first occurrences.
fn collect_symbols(symbols: &[String], file: Option<&PathBuf>) -> Result<Vec<String>> {
    let mut all: Vec<String> = symbols.iter().map(|s| s.trim().to_uppercase()).collect();
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read symbols file {}", path.display()))?;
        all.extend(parse_symbols(&text));
    }

    let mut seen = std::collections::HashSet::new();
    all.retain(|s| !s.is_empty() && seen.insert(s.clone()));
    Ok(all)
}
