use crate::components::availability::{DayAvailability, DaySlot, WeekAvailability, WeekWindow};
use crate::utils::i18n::{day_heading, text, weekday_short, Lang};
use crate::utils::time::{format_date, format_hour_range};
use askama::Template;
use chrono::{Datelike, NaiveDate};

/// One slot row, shared by both views
#[derive(Debug, Clone)]
pub struct SlotRow {
    pub class: &'static str,
    pub time: String,
    pub status: String,
}

/// One column of the grid view
#[derive(Debug, Clone)]
pub struct GridDay {
    pub class: String,
    pub name: String,
    pub number: u32,
    pub passed: bool,
    pub slots: Vec<SlotRow>,
}

/// One block of the list view
#[derive(Debug, Clone)]
pub struct ListDay {
    pub class: String,
    pub heading: String,
    pub is_today: bool,
    pub slots: Vec<SlotRow>,
}

/// Agenda fragment: navigation, grid view and list view, or the error panel
#[derive(Template)]
#[template(path = "agenda.html")]
pub struct AgendaTemplate {
    pub lang: &'static str,
    pub label: String,
    pub can_go_back: bool,
    pub prev_href: String,
    pub prev_text: String,
    pub next_href: String,
    pub next_text: String,
    pub toggle_href: String,
    pub toggle_label: &'static str,
    pub passed_text: String,
    pub today_text: String,
    pub error: bool,
    pub error_text: String,
    pub grid: Vec<GridDay>,
    pub list: Vec<ListDay>,
}

/// Link to the agenda of `week` in `lang`
pub fn agenda_href(week: WeekWindow, lang: Lang) -> String {
    format!("/agenda?week={}&lang={}", format_date(week.monday()), lang.code())
}

fn slot_rows(slots: &[DaySlot], lang: Lang) -> Vec<SlotRow> {
    let available = text("agenda_available", lang);
    let booked = text("agenda_booked", lang);
    slots
        .iter()
        .map(|slot| SlotRow {
            class: if slot.busy { "slot-busy" } else { "slot-free" },
            time: format_hour_range(slot.start_hour, slot.end_hour),
            status: if slot.busy { booked.clone() } else { available.clone() },
        })
        .collect()
}

fn grid_day(day: &DayAvailability, lang: Lang) -> GridDay {
    let mut class = String::from("agenda-day");
    if day.is_today {
        class.push_str(" today");
    }
    if day.is_past {
        class.push_str(" past");
    }

    GridDay {
        class,
        name: weekday_short(day.date.weekday(), lang),
        number: day.date.day(),
        passed: day.is_past,
        slots: slot_rows(&day.slots, lang),
    }
}

fn list_day(day: &DayAvailability, lang: Lang) -> ListDay {
    ListDay {
        class: if day.is_today {
            "agenda-list-day today".to_string()
        } else {
            "agenda-list-day".to_string()
        },
        heading: day_heading(day.date, lang),
        is_today: day.is_today,
        slots: slot_rows(&day.slots, lang),
    }
}

impl AgendaTemplate {
    fn frame(week: WeekWindow, lang: Lang, today: NaiveDate) -> Self {
        Self {
            lang: lang.code(),
            label: week.label(lang),
            can_go_back: week.can_go_back(today),
            prev_href: agenda_href(week.previous(today), lang),
            prev_text: text("agenda_previous_week", lang),
            next_href: agenda_href(week.next(), lang),
            next_text: text("agenda_next_week", lang),
            toggle_href: agenda_href(week, lang.toggle()),
            toggle_label: lang.toggle_label(),
            passed_text: text("agenda_passed", lang),
            today_text: text("agenda_today", lang),
            error: false,
            error_text: String::new(),
            grid: Vec::new(),
            list: Vec::new(),
        }
    }

    /// Agenda showing a computed week
    pub fn week(availability: &WeekAvailability, lang: Lang, today: NaiveDate) -> Self {
        let mut page = Self::frame(availability.week, lang, today);
        page.grid = availability
            .grid_days()
            .iter()
            .map(|day| grid_day(day, lang))
            .collect();
        page.list = availability.list_days().map(|day| list_day(day, lang)).collect();
        page
    }

    /// Error panel in place of the week
    pub fn error(week: WeekWindow, lang: Lang, today: NaiveDate) -> Self {
        let mut page = Self::frame(week, lang, today);
        page.error = true;
        page.error_text = text("agenda_error", lang);
        page
    }
}
