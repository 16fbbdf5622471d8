//! Calendar date normalization
//!
//! Two input shapes are accepted:
//! - ISO `yyyy-mm-dd`, month and day with one or two digits
//! - day-first `d/m/yyyy`, day and month with one or two digits
//!
//! Anything else, including empty input, is invalid. Calendar validity
//! (month lengths, leap years) is checked by `chrono`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Milliseconds in one day
pub const DAY_MS: i64 = 86_400_000;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("static ISO date pattern")
});

static DAY_FIRST_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("static day-first date pattern")
});

/// Parse a raw date token into a calendar date.
///
/// Surrounding whitespace is ignored. Returns `None` for unsupported shapes
/// and for dates that do not exist.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let token = raw.trim();

    if let Some(caps) = ISO_DATE.captures(token) {
        return from_parts(&caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = DAY_FIRST_DATE.captures(token) {
        return from_parts(&caps[3], &caps[2], &caps[1]);
    }
    None
}

/// Normalize a raw date token to canonical zero-padded `yyyy-mm-dd`.
///
/// ```
/// use actnet_core::normalize_date;
///
/// assert_eq!(normalize_date("2012-9-3").as_deref(), Some("2012-09-03"));
/// assert_eq!(normalize_date("3/9/2012").as_deref(), Some("2012-09-03"));
/// assert_eq!(normalize_date("2013-02-29"), None);
/// ```
#[must_use]
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_calendar_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

fn from_parts(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Epoch milliseconds of a calendar date taken at UTC midnight
#[must_use]
pub fn epoch_millis(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Signed whole days from `earliest` to `latest`, rounded to the nearest day
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn gap_days(earliest: NaiveDate, latest: NaiveDate) -> i64 {
    let delta = epoch_millis(latest) - epoch_millis(earliest);
    (delta as f64 / DAY_MS as f64).round() as i64
}
