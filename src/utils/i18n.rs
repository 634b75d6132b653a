//! Locale handling on top of the `rust-i18n` tables in `locales/`.
//!
//! Every lookup takes an explicit [`Lang`] so that concurrent requests in
//! different languages never go through the process-wide locale.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the site is published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    /// Locale code as used by the translation tables
    pub fn code(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    /// Parse a locale code such as `en`, `en-US` or `FR`
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        if code.starts_with("fr") {
            Some(Lang::Fr)
        } else if code.starts_with("en") {
            Some(Lang::En)
        } else {
            None
        }
    }

    /// Parse a locale code, falling back to `default` for unknown input
    pub fn from_code_or(code: Option<&str>, default: Lang) -> Self {
        code.and_then(Lang::from_code).unwrap_or(default)
    }

    /// The other language
    pub fn toggle(self) -> Self {
        match self {
            Lang::Fr => Lang::En,
            Lang::En => Lang::Fr,
        }
    }

    /// Label of the language toggle: the code of the language it switches to
    pub fn toggle_label(self) -> &'static str {
        match self.toggle() {
            Lang::Fr => "FR",
            Lang::En => "EN",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Set the process-wide fallback locale
pub fn set_locale(code: &str) {
    let lang = Lang::from_code(code).unwrap_or_default();
    rust_i18n::set_locale(lang.code());
}

/// Translate a message id for the given language
pub fn text(key: &str, lang: Lang) -> String {
    t!(key, locale = lang.code()).into_owned()
}

/// Full weekday name, e.g. "Lundi" / "Monday"
pub fn weekday_name(day: Weekday, lang: Lang) -> String {
    let key = match day {
        Weekday::Mon => "day_monday",
        Weekday::Tue => "day_tuesday",
        Weekday::Wed => "day_wednesday",
        Weekday::Thu => "day_thursday",
        Weekday::Fri => "day_friday",
        Weekday::Sat => "day_saturday",
        Weekday::Sun => "day_sunday",
    };
    text(key, lang)
}

/// Abbreviated weekday name, e.g. "Lun" / "Mon"
pub fn weekday_short(day: Weekday, lang: Lang) -> String {
    let key = match day {
        Weekday::Mon => "day_short_monday",
        Weekday::Tue => "day_short_tuesday",
        Weekday::Wed => "day_short_wednesday",
        Weekday::Thu => "day_short_thursday",
        Weekday::Fri => "day_short_friday",
        Weekday::Sat => "day_short_saturday",
        Weekday::Sun => "day_short_sunday",
    };
    text(key, lang)
}

/// Month name for a 1-based month number
pub fn month_name(month: u32, lang: Lang) -> String {
    let key = match month {
        1 => "month_january",
        2 => "month_february",
        3 => "month_march",
        4 => "month_april",
        5 => "month_may",
        6 => "month_june",
        7 => "month_july",
        8 => "month_august",
        9 => "month_september",
        10 => "month_october",
        11 => "month_november",
        _ => "month_december",
    };
    text(key, lang)
}

/// Long date as written in running text.
///
/// French: "lundi 19 octobre 2026", English: "Monday, October 19, 2026".
pub fn long_date(date: NaiveDate, lang: Lang) -> String {
    let weekday = weekday_name(date.weekday(), lang);
    let month = month_name(date.month(), lang);
    match lang {
        Lang::Fr => format!(
            "{} {} {} {}",
            weekday.to_lowercase(),
            date.day(),
            month,
            date.year()
        ),
        Lang::En => format!("{}, {} {}, {}", weekday, month, date.day(), date.year()),
    }
}

/// Heading of a day in the list view, e.g. "Lundi 19 octobre"
pub fn day_heading(date: NaiveDate, lang: Lang) -> String {
    format!(
        "{} {} {}",
        weekday_name(date.weekday(), lang),
        date.day(),
        month_name(date.month(), lang)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::from_code("fr"), Some(Lang::Fr));
        assert_eq!(Lang::from_code("en-US"), Some(Lang::En));
        assert_eq!(Lang::from_code(" EN "), Some(Lang::En));
        assert_eq!(Lang::from_code("de"), None);
        assert_eq!(Lang::from_code_or(Some("de"), Lang::Fr), Lang::Fr);
        assert_eq!(Lang::from_code_or(None, Lang::En), Lang::En);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Lang::Fr.toggle(), Lang::En);
        assert_eq!(Lang::En.toggle(), Lang::Fr);
        assert_eq!(Lang::Fr.toggle_label(), "EN");
        assert_eq!(Lang::En.toggle_label(), "FR");
    }

    #[test]
    fn test_names() {
        assert_eq!(weekday_name(Weekday::Mon, Lang::Fr), "Lundi");
        assert_eq!(weekday_name(Weekday::Sun, Lang::En), "Sunday");
        assert_eq!(weekday_short(Weekday::Wed, Lang::Fr), "Mer");
        assert_eq!(month_name(2, Lang::Fr), "février");
        assert_eq!(month_name(12, Lang::En), "December");
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(long_date(date, Lang::Fr), "lundi 19 octobre 2026");
        assert_eq!(long_date(date, Lang::En), "Monday, October 19, 2026");
        assert_eq!(day_heading(date, Lang::Fr), "Lundi 19 octobre");
    }
}
