use super::slots::{compute_day_slots, DaySlot, OperatingWindow};
use super::week::WeekWindow;
use crate::components::google_calendar::CalendarEvent;
use crate::utils::time::{is_past, is_today};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

/// Availability of one day of the displayed week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_past: bool,
    /// Empty for past days, which are shown as passed
    pub slots: Vec<DaySlot>,
}

/// The seven days of one week, ready for the grid and list views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekAvailability {
    pub week: WeekWindow,
    pub days: Vec<DayAvailability>,
}

impl WeekAvailability {
    pub fn build(
        week: WeekWindow,
        events: &[CalendarEvent],
        today: NaiveDate,
        window: OperatingWindow,
        tz: &Tz,
    ) -> Self {
        let days = week
            .days()
            .map(|date| {
                let past = is_past(date, today);
                let slots = if past {
                    Vec::new()
                } else {
                    compute_day_slots(events, date, window, tz)
                };
                DayAvailability {
                    date,
                    is_today: is_today(date, today),
                    is_past: past,
                    slots,
                }
            })
            .collect();

        Self { week, days }
    }

    /// Days shown in the grid view: the whole week
    pub fn grid_days(&self) -> &[DayAvailability] {
        &self.days
    }

    /// Days shown in the list view: past days are left out
    pub fn list_days(&self) -> impl Iterator<Item = &DayAvailability> {
        self.days.iter().filter(|day| !day.is_past)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    const TZ: Tz = chrono_tz::Pacific::Tahiti;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_with_past_days() {
        // Wednesday of the displayed week
        let today = date(2026, 10, 21);
        let week = WeekWindow::current(today);
        let events = vec![
            // On a past day: never computed
            CalendarEvent::timed(
                "monday",
                DateTime::parse_from_rfc3339("2026-10-19T09:00:00-10:00").unwrap(),
                DateTime::parse_from_rfc3339("2026-10-19T10:00:00-10:00").unwrap(),
            ),
            CalendarEvent::all_day("friday", date(2026, 10, 23), date(2026, 10, 24)),
        ];

        let availability =
            WeekAvailability::build(week, &events, today, OperatingWindow::default(), &TZ);

        assert_eq!(availability.grid_days().len(), 7);
        let monday = &availability.days[0];
        assert!(monday.is_past);
        assert!(monday.slots.is_empty());

        let wednesday = &availability.days[2];
        assert!(wednesday.is_today);
        assert!(!wednesday.is_past);
        assert_eq!(wednesday.slots, vec![DaySlot::new(7, 19, false)]);

        let friday = &availability.days[4];
        assert_eq!(friday.slots, vec![DaySlot::new(7, 19, true)]);

        let listed: Vec<NaiveDate> = availability.list_days().map(|day| day.date).collect();
        assert_eq!(listed.first(), Some(&today));
        assert_eq!(listed.len(), 5);
    }

    #[test]
    fn test_future_week_has_no_past_days() {
        let today = date(2026, 10, 21);
        let week = WeekWindow::current(today).next();
        let availability =
            WeekAvailability::build(week, &[], today, OperatingWindow::default(), &TZ);

        assert!(availability.days.iter().all(|day| !day.is_past && !day.is_today));
        assert_eq!(availability.list_days().count(), 7);
    }
}
