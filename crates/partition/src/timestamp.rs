//! Rendering of last-modified timestamps.
//!
//! Timestamps are written as `YYYY-MM-DDTHH:MM:SS` in UTC.

use std::time::{SystemTime, UNIX_EPOCH};

use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Render a system time, or `None` if it cannot be represented.
pub fn format_system_time(t: SystemTime) -> Option<String> {
    let utc = match t.duration_since(UNIX_EPOCH) {
        Ok(after) => OffsetDateTime::UNIX_EPOCH.checked_add(Duration::try_from(after).ok()?)?,
        Err(before) => {
            OffsetDateTime::UNIX_EPOCH.checked_sub(Duration::try_from(before.duration()).ok()?)?
        }
    };
    utc.format(TIMESTAMP_FORMAT).ok()
}

/// Accept a timestamp written either as `YYYY-MM-DDTHH:MM:SS` or as RFC 3339
/// and return it in the canonical form.
pub fn normalize_timestamp(s: &str) -> Option<String> {
    let s = s.trim();
    if let Ok(t) = PrimitiveDateTime::parse(s, TIMESTAMP_FORMAT) {
        return t.format(TIMESTAMP_FORMAT).ok();
    }
    let t = OffsetDateTime::parse(s, &Rfc3339).ok()?;
    t.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT).ok()
}
