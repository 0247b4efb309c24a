//! Window command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use optweek_lib::select_week_window_with;

use crate::HolidayArgs;
use crate::commands::load_calendar;
use crate::display::print_window;

/// Show the two-week window selected for `today`.
pub(crate) async fn show_window(args: &HolidayArgs, today: NaiveDate) -> Result<()> {
    let calendar = load_calendar(args, today).await?;
    let window = select_week_window_with(today, &calendar, args.anchor_rule)
        .with_context(|| format!("No valid window for {today}"))?;

    println!("Today: {} ({} rule)\n", today.format("%a %Y-%m-%d"), args.anchor_rule);
    print_window(&window);
    Ok(())
}
