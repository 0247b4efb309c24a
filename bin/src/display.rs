//! Display utilities and CLI value types for the optweek CLI.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use optweek_lib::prelude::*;

/// Output format for tabular files.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Holiday source selection.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum HolidaySourceKind {
    /// NSE holiday feed, falling back to the holiday calendar page
    Nse,
    /// Holiday calendar page only
    Page,
    /// Local CSV sheet given by --holiday-sheet
    Sheet,
    /// No holidays; only weekends are skipped
    None,
}

/// Option sides to analyse.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Side {
    Ce,
    Pe,
    Both,
}

impl Side {
    pub(crate) fn option_types(self) -> Vec<OptionType> {
        match self {
            Self::Ce => vec![OptionType::Call],
            Self::Pe => vec![OptionType::Put],
            Self::Both => OptionType::all().to_vec(),
        }
    }
}

/// Creates the download progress bar, hidden in quiet mode.
pub(crate) fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} contracts {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Prints the four window dates, oldest first.
pub(crate) fn print_window(window: &WeekWindow) {
    println!("Two weeks ago:");
    println!("  {:<16} {}", "open", window.first_week_open().format("%a %Y-%m-%d"));
    println!("  {:<16} {}", "close", window.first_week_close().format("%a %Y-%m-%d"));
    println!("Last week:");
    println!("  {:<16} {}", "open", window.last_week_open().format("%a %Y-%m-%d"));
    println!("  {:<16} {}", "close", window.last_week_close().format("%a %Y-%m-%d"));
}

/// Prints a holiday table.
pub(crate) fn print_holidays(holidays: &HolidaySet) {
    if holidays.is_empty() {
        println!("No holidays known for {}.", holidays.year());
        return;
    }
    println!("{:<12} {:<10} {:<40} {}", "DATE", "DAY", "DESCRIPTION", "EXCHANGES");
    println!("{}", "-".repeat(80));
    for holiday in holidays.iter() {
        println!(
            "{:<12} {:<10} {:<40} {}",
            holiday.date.format("%Y-%m-%d"),
            holiday.day,
            holiday.description,
            holiday.exchanges
        );
    }
    println!("\nTotal: {} holidays", holidays.len());
}
