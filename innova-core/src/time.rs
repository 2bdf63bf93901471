//! Time utilities: calendar days in the user's timezone.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CoachError, Result};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parse an IANA timezone like "America/Chicago".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| CoachError::InvalidTimezone(tz.to_string()))
}

/// Parse a calendar date like "2026-02-20".
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| CoachError::InvalidDate {
        input: input.to_string(),
    })
}

/// The calendar date `now` falls on in `tz`.
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Start of `date` in `tz`, as UTC.
///
/// A midnight skipped by a DST jump falls back to reading the date as UTC midnight.
pub fn start_of_day_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Whole days until `deadline` starts, rounded up.
///
/// Zero once the deadline day has begun, negative after it.
pub fn days_until(deadline: NaiveDate, now: DateTime<Utc>, tz: Tz) -> i64 {
    let secs = (start_of_day_utc(deadline, tz) - now).num_seconds();
    let whole = secs.div_euclid(SECONDS_PER_DAY);
    if secs.rem_euclid(SECONDS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Helper: format a UTC time into RFC3339.
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
