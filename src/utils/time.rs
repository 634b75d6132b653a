use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Current instant expressed in the studio time zone
pub fn now_in(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Today's calendar date in the studio time zone
pub fn today_in(tz: &Tz) -> NaiveDate {
    now_in(tz).date_naive()
}

/// Monday of the week containing `date`
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Whether `date` lies strictly before `today`
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Whether `date` is `today`
pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Format a date as YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format the wall-clock time as HH:MM
pub fn format_clock<T: TimeZone>(time: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    time.format("%H:%M").to_string()
}

/// Format an hour range as shown on slots, e.g. "7h – 9h"
pub fn format_hour_range(start_hour: u32, end_hour: u32) -> String {
    format!("{}h – {}h", start_hour, end_hour)
}

/// Local midnight at the start of `date`
///
/// Falls back to the earliest valid instant of the day when midnight does
/// not exist in `tz` (DST gaps).
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) => Some(dt),
        chrono::LocalResult::Ambiguous(earliest, _) => Some(earliest),
        chrono::LocalResult::None => {
            let one_am = date.and_hms_opt(1, 0, 0)?;
            tz.from_local_datetime(&one_am).earliest()
        }
    }
}
