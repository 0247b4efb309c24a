//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod holidays;
pub(crate) mod login;
pub(crate) mod window;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use optweek_lib::{
    FallbackSource, HolidayCalendar, HolidayPage, HolidaySource, NseHolidayFeed, SheetSource,
    StaticHolidays, window_years,
};

use crate::HolidayArgs;
use crate::display::HolidaySourceKind;

/// Builds the holiday source selected on the command line.
pub(crate) fn holiday_source(args: &HolidayArgs) -> Result<Box<dyn HolidaySource>> {
    let source: Box<dyn HolidaySource> = match args.source {
        HolidaySourceKind::Nse => Box::new(FallbackSource::new(vec![
            Box::new(NseHolidayFeed::new()?),
            Box::new(HolidayPage::new()?),
        ])),
        HolidaySourceKind::Page => Box::new(HolidayPage::new()?),
        HolidaySourceKind::Sheet => {
            let path = args
                .holiday_sheet
                .clone()
                .context("--holidays sheet needs --holiday-sheet <PATH>")?;
            Box::new(SheetSource::new(path))
        }
        HolidaySourceKind::None => Box::new(StaticHolidays::none()),
    };
    Ok(source)
}

/// Loads the holidays of every year a window selected on `today` can touch.
pub(crate) async fn load_calendar(args: &HolidayArgs, today: NaiveDate) -> Result<HolidayCalendar> {
    let source = holiday_source(args)?;
    Ok(HolidayCalendar::load(source.as_ref(), window_years(today)).await)
}
