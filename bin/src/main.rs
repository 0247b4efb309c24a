//! optweek CLI - weekly bullish-continuation scanner for NSE stock options.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use optweek_lib::AnchorRule;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::{Format, HolidaySourceKind, Side};

#[derive(Parser)]
#[command(name = "optweek")]
#[command(about = "Weekly bullish-continuation scanner for NSE stock options", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Run as if today were this date (YYYY-MM-DD). Defaults to today in IST.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

/// Kite Connect credentials.
#[derive(Args)]
pub(crate) struct KiteArgs {
    /// Kite Connect API key
    #[arg(long, env = "KITE_API_KEY", hide_env_values = true)]
    pub(crate) api_key: String,

    /// Kite Connect API secret (needed only to create a session)
    #[arg(long, env = "KITE_API_SECRET", hide_env_values = true)]
    pub(crate) api_secret: Option<String>,

    /// Access token of an existing session
    #[arg(long, env = "KITE_ACCESS_TOKEN", hide_env_values = true)]
    pub(crate) access_token: Option<String>,

    /// Request token from the login redirect
    #[arg(long, env = "KITE_REQUEST_TOKEN", hide_env_values = true)]
    pub(crate) request_token: Option<String>,
}

/// Where exchange holidays come from.
#[derive(Args)]
pub(crate) struct HolidayArgs {
    /// Holiday source
    #[arg(long = "holidays", value_enum, default_value = "nse")]
    pub(crate) source: HolidaySourceKind,

    /// Holiday sheet (CSV with Date and Description columns) for --holidays sheet
    #[arg(long)]
    pub(crate) holiday_sheet: Option<PathBuf>,

    /// How "two weeks ago" is counted (weekend, monday)
    #[arg(long, default_value = "weekend")]
    pub(crate) anchor_rule: AnchorRule,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan option chains and write the analysis files
    Analyze {
        /// Underlying symbol to scan (repeatable)
        #[arg(short, long = "symbol")]
        symbols: Vec<String>,

        /// File with one symbol per line ('#' starts a comment)
        #[arg(long)]
        symbols_file: Option<PathBuf>,

        /// Option sides to analyse
        #[arg(long, value_enum, default_value = "both")]
        side: Side,

        /// Symbol whose expiry calendar picks the contract expiry
        #[arg(long, default_value = "ABB")]
        reference_symbol: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Output format for tabular files
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Maximum concurrent history downloads
        #[arg(long, default_value = "3")]
        concurrency: usize,

        #[command(flatten)]
        holidays: HolidayArgs,

        #[command(flatten)]
        kite: KiteArgs,
    },

    /// Show the two-week window that would be analysed
    Window {
        #[command(flatten)]
        holidays: HolidayArgs,
    },

    /// List exchange holidays
    Holidays {
        /// Calendar year. Defaults to the current year.
        #[arg(short, long)]
        year: Option<i32>,

        #[command(flatten)]
        holidays: HolidayArgs,
    },

    /// Create a Kite session and print its access token
    Login {
        #[command(flatten)]
        kite: KiteArgs,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let today = cli.today.unwrap_or_else(optweek_lib::market_today);

    match command {
        Commands::Analyze {
            symbols,
            symbols_file,
            side,
            reference_symbol,
            output_dir,
            format,
            concurrency,
            holidays,
            kite,
        } => {
            commands::analyze::analyze(commands::analyze::AnalyzeOptions {
                symbols,
                symbols_file,
                side,
                reference_symbol,
                output_dir,
                format,
                concurrency,
                holidays,
                kite,
                today,
                quiet: cli.quiet,
            })
            .await
        }
        Commands::Window { holidays } => commands::window::show_window(&holidays, today).await,
        Commands::Holidays { year, holidays } => {
            commands::holidays::list_holidays(&holidays, year.unwrap_or_else(|| chrono::Datelike::year(&today)))
                .await
        }
        Commands::Login { kite } => commands::login::login(&kite).await,
    }
}
