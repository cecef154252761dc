//! Calendar-day arithmetic for due dates.
//!
//! # Invariants
//! - Due dates are calendar days without time; they start at local midnight.
//! - Day differences round up (ceiling division by one day in ms), so a
//!   23h or 25h DST day still yields a whole-day count.

use chrono::{Datelike, LocalResult, NaiveDate, TimeZone};

/// Milliseconds in a nominal day.
pub const MS_PER_DAY: i64 = 86_400_000;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole days from today (in the system local zone) until `due`.
///
/// Negative means overdue; `None` when `due` is absent.
pub fn days_until(due: Option<NaiveDate>, now_ms: i64) -> Option<i64> {
    days_until_in(due, now_ms, &chrono::Local)
}

/// Same as [`days_until`] with an explicit time zone.
pub fn days_until_in<Tz: TimeZone>(due: Option<NaiveDate>, now_ms: i64, tz: &Tz) -> Option<i64> {
    let due = due?;
    let today = today_in(now_ms, tz)?;
    let today_start = midnight_ms(today, tz)?;
    let due_start = midnight_ms(due, tz)?;
    Some(div_ceil(due_start - today_start, MS_PER_DAY))
}

/// Calendar day that contains `now_ms` in `tz`.
pub fn today_in<Tz: TimeZone>(now_ms: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(now_ms)
        .single()
        .map(|now| now.date_naive())
}

/// Parses `YYYY-MM-DD`; blank or invalid text means "no due date".
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Formats a date as a short `M/D` label.
pub fn format_month_day(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

fn midnight_ms<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<i64> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(start) => Some(start.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        // Midnight skipped by a DST jump: the day starts one hour later.
        LocalResult::None => {
            let shifted = date.and_hms_opt(1, 0, 0)?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|start| start.timestamp_millis())
        }
    }
}

fn div_ceil(numerator: i64, denominator: i64) -> i64 {
    -(-numerator).div_euclid(denominator)
}
