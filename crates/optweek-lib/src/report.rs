//! Writing run artifacts to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use optweek_format::{
    ArtifactNames, CsvFormatter, DEFAULT_PREFIX, DailyRow, FormatError, Formatter, InstrumentRow,
    JsonFormatter, OutputFormat, WeeklyRow, write_results,
};
use optweek_types::Instrument;
use tracing::info;

use crate::{AnalysisError, AnalysisReport, AnalysisRun};

/// Files written for one option side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    /// Selected contracts.
    pub options: PathBuf,
    /// Daily OHLC rows.
    pub daily: PathBuf,
    /// Weekly OHLC rows.
    pub weekly: PathBuf,
    /// Signal lines.
    pub results: PathBuf,
}

enum Table<'a> {
    Instruments(&'a [InstrumentRow]),
    Daily(&'a [DailyRow]),
    Weekly(&'a [WeeklyRow]),
}

impl Table<'_> {
    fn write_to<F: Formatter, W: Write + Send>(&self, formatter: &F, writer: W) -> Result<(), FormatError> {
        match self {
            Self::Instruments(rows) => formatter.write_instruments(rows, writer),
            Self::Daily(rows) => formatter.write_daily(rows, writer),
            Self::Weekly(rows) => formatter.write_weekly(rows, writer),
        }
    }
}

fn write_table(path: &Path, format: OutputFormat, table: &Table<'_>) -> Result<(), AnalysisError> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => table.write_to(&CsvFormatter::new(), &mut writer)?,
        OutputFormat::Json => table.write_to(&JsonFormatter::new(), &mut writer)?,
        OutputFormat::Ndjson => table.write_to(&JsonFormatter::ndjson(), &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Writes the full instrument list.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_original(
    instruments: &[Instrument],
    dir: &Path,
    format: OutputFormat,
    names: &ArtifactNames,
) -> Result<PathBuf, AnalysisError> {
    let rows: Vec<InstrumentRow> = instruments.iter().map(InstrumentRow::from).collect();
    let path = dir.join(names.original());
    write_table(&path, format, &Table::Instruments(&rows))?;
    Ok(path)
}

/// Writes the contracts, daily rows, weekly rows and results of one side.
///
/// # Errors
///
/// Returns an error if any file cannot be written.
pub fn write_report(
    report: &AnalysisReport,
    dir: &Path,
    format: OutputFormat,
    names: &ArtifactNames,
) -> Result<ReportFiles, AnalysisError> {
    let side = report.side;
    let files = ReportFiles {
        options: dir.join(names.options(side)),
        daily: dir.join(names.daily(side)),
        weekly: dir.join(names.weekly(side)),
        results: dir.join(ArtifactNames::results(side)),
    };

    let contracts: Vec<InstrumentRow> = report.contracts.iter().map(InstrumentRow::from).collect();
    write_table(&files.options, format, &Table::Instruments(&contracts))?;
    write_table(&files.daily, format, &Table::Daily(&report.daily))?;
    write_table(&files.weekly, format, &Table::Weekly(&report.weekly))?;

    let results = BufWriter::new(File::create(&files.results)?);
    let lines = write_results(&report.signals, results)?;
    info!(%side, signals = lines, path = %files.results.display(), "Wrote results");

    Ok(files)
}

/// Writes every artifact of `run` into `dir`, creating it if needed.
///
/// All file names carry the `started` timestamp.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn write_run(
    run: &AnalysisRun,
    dir: &Path,
    format: OutputFormat,
    started: NaiveDateTime,
) -> Result<Vec<PathBuf>, AnalysisError> {
    fs::create_dir_all(dir)?;
    let names = ArtifactNames::new(DEFAULT_PREFIX, started, format.extension());

    let mut written = vec![write_original(&run.instruments, dir, format, &names)?];
    for report in &run.reports {
        let files = write_report(report, dir, format, &names)?;
        written.extend([files.options, files.daily, files.weekly, files.results]);
    }
    Ok(written)
}
