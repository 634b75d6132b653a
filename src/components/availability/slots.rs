use crate::components::google_calendar::time::{local_date, local_instant};
use crate::components::google_calendar::CalendarEvent;
use crate::error::{config_error, SiteResult};
use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Daily hour range during which availability is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatingWindow {
    start_hour: u32,
    end_hour: u32,
}

impl OperatingWindow {
    /// Create a window covering `[start_hour, end_hour)`
    pub fn new(start_hour: u32, end_hour: u32) -> SiteResult<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(config_error(&format!(
                "Invalid operating window {}h-{}h",
                start_hour, end_hour
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn hours(&self) -> Range<u32> {
        self.start_hour..self.end_hour
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self {
            start_hour: 7,
            end_hour: 19,
        }
    }
}

/// Contiguous run of hours sharing one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    pub start_hour: u32,
    pub end_hour: u32,
    pub busy: bool,
}

impl DaySlot {
    pub fn new(start_hour: u32, end_hour: u32, busy: bool) -> Self {
        Self {
            start_hour,
            end_hour,
            busy,
        }
    }
}

/// Events that count towards `day`.
///
/// An event belongs to the day it starts on. Timed events starting outside
/// the operating window are ignored.
pub fn events_for_day<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
    window: OperatingWindow,
    tz: &Tz,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| local_date(&event.start, tz) == day)
        .filter(|event| match local_instant(&event.start, tz) {
            Some(start) => window.contains(start.hour()),
            None => true,
        })
        .collect()
}

/// Hours `[start, end)` occupied by a timed event on `day`, before clipping
/// to the window. A partial last hour counts as a whole one.
fn busy_hours(event: &CalendarEvent, day: NaiveDate, window: OperatingWindow, tz: &Tz) -> Range<u32> {
    let (Some(start), Some(end)) = (
        local_instant(&event.start, tz),
        local_instant(&event.end, tz),
    ) else {
        return window.hours();
    };

    let start_hour = start.hour();
    let end_date = end.date_naive();
    let end_hour = if end_date > day {
        window.end_hour()
    } else if end_date < day {
        start_hour
    } else if end.minute() > 0 {
        end.hour() + 1
    } else {
        end.hour()
    };

    start_hour..end_hour
}

/// Partition the operating window of `day` into maximal free/busy slots
pub fn compute_day_slots(
    events: &[CalendarEvent],
    day: NaiveDate,
    window: OperatingWindow,
    tz: &Tz,
) -> Vec<DaySlot> {
    let mut units: Vec<(u32, bool)> = window.hours().map(|hour| (hour, false)).collect();

    for event in events_for_day(events, day, window, tz) {
        if event.is_all_day() {
            units.iter_mut().for_each(|unit| unit.1 = true);
            continue;
        }

        let occupied = busy_hours(event, day, window, tz);
        for unit in units.iter_mut().filter(|unit| occupied.contains(&unit.0)) {
            unit.1 = true;
        }
    }

    merge_units(&units)
}

fn merge_units(units: &[(u32, bool)]) -> Vec<DaySlot> {
    let mut merged: Vec<DaySlot> = Vec::new();
    for &(hour, busy) in units {
        match merged.last_mut() {
            Some(last) if last.busy == busy => last.end_hour = hour + 1,
            _ => merged.push(DaySlot::new(hour, hour + 1, busy)),
        }
    }
    merged
}
