//! Holidays command implementation.

use anyhow::Result;
use optweek_lib::get_holidays;

use crate::HolidayArgs;
use crate::commands::holiday_source;
use crate::display::print_holidays;

/// List the holidays of `year` from the selected source.
pub(crate) async fn list_holidays(args: &HolidayArgs, year: i32) -> Result<()> {
    let source = holiday_source(args)?;
    let holidays = get_holidays(source.as_ref(), year).await;
    print_holidays(&holidays);
    Ok(())
}
