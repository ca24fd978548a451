//! Time utilities: reference dates in the provider's timezone.

use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone the provider publishes schedules in.
pub const DEFAULT_TIMEZONE: &str = "Europe/Kyiv";

/// Parse an IANA timezone name like "Europe/Kyiv".
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))
}

/// Today and tomorrow as calendar dates in `tz`.
pub fn reference_dates(now_utc: DateTime<Utc>, tz: Tz) -> [NaiveDate; 2] {
    let today = now_utc.with_timezone(&tz).date_naive();
    [today, next_day(today)]
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(date)
}

/// Date as written in section headers: `DD.MM.YYYY`.
pub fn section_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Date as written in notification titles: `DD.MM`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}
