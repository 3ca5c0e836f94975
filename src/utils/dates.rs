//! Date helpers for upstream payloads
//!
//! Upstream timestamps are not trustworthy: the ArcGIS feed reports Unix
//! milliseconds, sometimes truncated, and the worldwide API reports
//! milliseconds too. Both are reduced to their first 10 digits (seconds)
//! before formatting.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Shown in place of a date when the upstream timestamp is unusable
pub const NO_INFORMATION: &str = "sem informação";

/// Number of leading digits kept from a timestamp (Unix seconds)
const SECONDS_DIGITS: usize = 10;

/// Format an upstream timestamp as `YYYY-MM-DD` (UTC)
///
/// Returns [`NO_INFORMATION`] when the decimal form is shorter than 10
/// characters or the truncated value is not a representable instant.
pub fn ts_to_date(ts: i64) -> String {
    let digits = ts.to_string();
    if digits.len() < SECONDS_DIGITS {
        return NO_INFORMATION.to_string();
    }

    // The decimal form is ASCII, so byte slicing stays on char boundaries
    digits[..SECONDS_DIGITS]
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NO_INFORMATION.to_string())
}

/// Parse the report date of the national last-update payload
///
/// The field looks like `19-10-2020` or `19-10-2020 00:00`; only the
/// leading `DD-MM-YYYY` is read.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..SECONDS_DIGITS)?;
    NaiveDate::parse_from_str(head, "%d-%m-%Y").ok()
}

/// Calendar date of a UTC instant in the given timezone
pub fn local_date<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// Whether the worldwide statistics should be taken from yesterday
///
/// The national report lags behind the worldwide feed: until the day's
/// report is published, yesterday's worldwide numbers are the ones that
/// match it.
pub fn should_use_yesterday(today: NaiveDate, report_date: NaiveDate) -> bool {
    today > report_date
}
