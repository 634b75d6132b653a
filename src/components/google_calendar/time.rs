use super::models::EventTime;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

/// Instant of a timed start/end in the studio time zone; `None` for dates
pub fn local_instant(time: &EventTime, tz: &Tz) -> Option<DateTime<Tz>> {
    match time {
        EventTime::DateTime(instant) => Some(instant.with_timezone(tz)),
        EventTime::Date(_) => None,
    }
}

/// Calendar date of a start/end in the studio time zone
pub fn local_date(time: &EventTime, tz: &Tz) -> NaiveDate {
    match time {
        EventTime::DateTime(instant) => instant.with_timezone(tz).date_naive(),
        EventTime::Date(date) => *date,
    }
}
