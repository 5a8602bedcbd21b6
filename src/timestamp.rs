//! Turn the separate day and hour columns of the feed into an instant.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::errors::KnmiDataErr;

/// Combine a calendar day and an hour of the day into a UTC instant.
///
/// The feed numbers hours 1 through 24, each marking the end of the hour it covers, so hour 1 is
/// midnight and hour 24 is 23:00 of the same day. The hours are not local clock hours, no daylight
/// saving adjustment is made.
pub fn derive_time(day: NaiveDate, hour: u32) -> Result<DateTime<Utc>, KnmiDataErr> {
    if !(1..=24).contains(&hour) {
        return Err(KnmiDataErr::InvalidHour(hour));
    }

    let midnight = day.and_time(chrono::NaiveTime::MIN).and_utc();
    Ok(midnight + Duration::hours(i64::from(hour) - 1))
}
