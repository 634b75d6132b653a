use crate::utils::i18n::{month_name, Lang};
use crate::utils::time::{monday_of, start_of_day};
use chrono::{DateTime, Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Monday anchoring the seven days shown on the agenda
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekWindow {
    monday: NaiveDate,
}

impl WeekWindow {
    /// Week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            monday: monday_of(date),
        }
    }

    /// Week containing today
    pub fn current(today: NaiveDate) -> Self {
        Self::containing(today)
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn sunday(&self) -> NaiveDate {
        self.monday + Duration::days(6)
    }

    /// The seven dates of the week, Monday first
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let monday = self.monday;
        (0..7).map(move |offset| monday + Duration::days(offset))
    }

    /// The following week
    pub fn next(self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }

    /// The preceding week, never earlier than the week of `today`
    pub fn previous(self, today: NaiveDate) -> Self {
        Self {
            monday: self.monday - Duration::days(7),
        }
        .clamp_to(today)
    }

    /// Whether navigating back would move the anchor
    pub fn can_go_back(&self, today: NaiveDate) -> bool {
        *self > Self::current(today)
    }

    /// Move weeks that precede the current one up to it
    pub fn clamp_to(self, today: NaiveDate) -> Self {
        self.max(Self::current(today))
    }

    /// Local midnight of the Monday and of the following Monday
    pub fn time_range(&self, tz: &Tz) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let start = start_of_day(self.monday, tz)?;
        let end = start_of_day(self.next().monday, tz)?;
        Some((start, end))
    }

    /// Human readable label, e.g. "19 – 25 octobre 2026"
    pub fn label(&self, lang: Lang) -> String {
        let monday = self.monday;
        let sunday = self.sunday();
        let start_month = month_name(monday.month(), lang);

        if monday.month() == sunday.month() {
            format!(
                "{} – {} {} {}",
                monday.day(),
                sunday.day(),
                start_month,
                sunday.year()
            )
        } else {
            format!(
                "{} {} – {} {} {}",
                monday.day(),
                start_month,
                sunday.day(),
                month_name(sunday.month(), lang),
                sunday.year()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_anchor_is_monday() {
        let week = WeekWindow::containing(date(2026, 10, 23));
        assert_eq!(week.monday(), date(2026, 10, 19));
        assert_eq!(week.monday().weekday(), Weekday::Mon);
        assert_eq!(week.sunday(), date(2026, 10, 25));
    }

    #[test]
    fn test_days() {
        let days: Vec<NaiveDate> = WeekWindow::containing(date(2026, 10, 28)).days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2026, 10, 26));
        assert_eq!(days[6], date(2026, 11, 1));
    }

    #[test]
    fn test_next_advances_seven_days() {
        let week = WeekWindow::containing(date(2026, 10, 19));
        assert_eq!(week.next().monday(), date(2026, 10, 26));
        assert_eq!(week.next().next().monday(), date(2026, 11, 2));
    }

    #[test]
    fn test_previous_is_clamped_to_current_week() {
        let today = date(2026, 10, 21);
        let current = WeekWindow::current(today);

        assert_eq!(current.previous(today), current);
        assert!(!current.can_go_back(today));

        let later = current.next().next();
        assert!(later.can_go_back(today));
        assert_eq!(later.previous(today), current.next());
    }

    #[test]
    fn test_clamp_to() {
        let today = date(2026, 10, 21);
        let old = WeekWindow::containing(date(2026, 1, 1));
        assert_eq!(old.clamp_to(today), WeekWindow::current(today));

        let future = WeekWindow::containing(date(2027, 1, 1));
        assert_eq!(future.clamp_to(today), future);
    }

    #[test]
    fn test_time_range() {
        let tz = chrono_tz::Pacific::Tahiti;
        let (start, end) = WeekWindow::containing(date(2026, 10, 21))
            .time_range(&tz)
            .unwrap();
        assert_eq!(start.to_rfc3339(), "2026-10-19T00:00:00-10:00");
        assert_eq!(end.to_rfc3339(), "2026-10-26T00:00:00-10:00");
    }

    #[test]
    fn test_label_same_month() {
        let week = WeekWindow::containing(date(2026, 10, 19));
        assert_eq!(week.label(Lang::Fr), "19 – 25 octobre 2026");
        assert_eq!(week.label(Lang::En), "19 – 25 October 2026");
    }

    #[test]
    fn test_label_across_months_and_years() {
        let week = WeekWindow::containing(date(2026, 10, 28));
        assert_eq!(week.label(Lang::Fr), "26 octobre – 1 novembre 2026");

        // Year of the Sunday
        let week = WeekWindow::containing(date(2026, 12, 30));
        assert_eq!(week.label(Lang::En), "28 December – 3 January 2027");
    }
}
