use crate::components::availability::OperatingWindow;
use crate::error::{config_error, env_error, SiteResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Default studio time zone
pub const DEFAULT_TIMEZONE: &str = "Pacific/Tahiti";

/// Default base URL of the Google Calendar v3 API
pub const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Default base URL of the EmailJS REST API
pub const DEFAULT_EMAILJS_API_BASE: &str = "https://api.emailjs.com";

/// Main configuration structure for the site service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google API key with read access to the public calendar
    pub google_api_key: String,
    /// Google Calendar ID holding the studio bookings
    pub google_calendar_id: String,
    /// Base URL of the calendar API
    pub calendar_api_base: String,
    /// EmailJS service identifier
    pub emailjs_service_id: String,
    /// EmailJS template identifier
    pub emailjs_template_id: String,
    /// EmailJS public key
    pub emailjs_public_key: String,
    /// EmailJS private key, required when the account enforces it
    pub emailjs_private_key: Option<String>,
    /// Base URL of the EmailJS API
    pub emailjs_api_base: String,
    /// reCAPTCHA secret; verification is skipped when unset
    pub recaptcha_secret: Option<String>,
    /// Studio time zone (IANA name)
    pub timezone: String,
    /// Place name shown next to the submission time, e.g. "Tahiti"
    pub timezone_label: String,
    /// First bookable hour of the day
    pub hour_start: u32,
    /// Hour at which the agenda closes (exclusive)
    pub hour_end: u32,
    /// Default locale of the site
    pub site_locale: String,
    /// Locale of the texts sent to the studio by email
    pub notification_locale: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Directory holding the static site
    pub site_dir: String,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> SiteResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_api_key = env::var("GOOGLE_API_KEY").map_err(|_| env_error("GOOGLE_API_KEY"))?;
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").map_err(|_| env_error("GOOGLE_CALENDAR_ID"))?;
        let emailjs_service_id =
            env::var("EMAILJS_SERVICE_ID").map_err(|_| env_error("EMAILJS_SERVICE_ID"))?;
        let emailjs_template_id =
            env::var("EMAILJS_TEMPLATE_ID").map_err(|_| env_error("EMAILJS_TEMPLATE_ID"))?;
        let emailjs_public_key =
            env::var("EMAILJS_PUBLIC_KEY").map_err(|_| env_error("EMAILJS_PUBLIC_KEY"))?;

        // Optional secrets
        let emailjs_private_key = non_empty_var("EMAILJS_PRIVATE_KEY");
        let recaptcha_secret = non_empty_var("RECAPTCHA_SECRET");

        // Parse numeric values
        let hour_start = parse_var("AGENDA_HOUR_START", 7u32)?;
        let hour_end = parse_var("AGENDA_HOUR_END", 19u32)?;
        let port = parse_var("PORT", 3000u16)?;

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("google_calendar".to_string(), true);
        components.insert("contact".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            let file_components = toml::from_str::<HashMap<String, bool>>(&content)?;
            // Merge with defaults
            for (key, value) in file_components {
                components.insert(key, value);
            }
        }

        let config = Config {
            google_api_key,
            google_calendar_id,
            calendar_api_base: env::var("GOOGLE_CALENDAR_API_BASE")
                .unwrap_or_else(|_| DEFAULT_CALENDAR_API_BASE.to_string()),
            emailjs_service_id,
            emailjs_template_id,
            emailjs_public_key,
            emailjs_private_key,
            emailjs_api_base: env::var("EMAILJS_API_BASE")
                .unwrap_or_else(|_| DEFAULT_EMAILJS_API_BASE.to_string()),
            recaptcha_secret,
            timezone: env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
            timezone_label: env::var("TIMEZONE_LABEL").unwrap_or_else(|_| "Tahiti".to_string()),
            hour_start,
            hour_end,
            site_locale: env::var("SITE_LOCALE").unwrap_or_else(|_| "fr".to_string()),
            notification_locale: env::var("NOTIFICATION_LOCALE")
                .unwrap_or_else(|_| "fr".to_string()),
            port,
            site_dir: env::var("SITE_DIR").unwrap_or_else(|_| "./public".to_string()),
            components,
        };

        // Fail early on values the agenda cannot work with
        config.tz()?;
        config.operating_window()?;

        Ok(config)
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Parse the configured studio time zone
    pub fn tz(&self) -> SiteResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid TIMEZONE: {}", self.timezone)))
    }

    /// Daily window during which availability is shown
    pub fn operating_window(&self) -> SiteResult<OperatingWindow> {
        OperatingWindow::new(self.hour_start, self.hour_end)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> SiteResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| config_error(&format!("Invalid {} format", name))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    let mut components = HashMap::new();
    components.insert("google_calendar".to_string(), true);
    components.insert("contact".to_string(), true);

    Config {
        google_api_key: "test_api_key".to_string(),
        google_calendar_id: "studio@example.com".to_string(),
        calendar_api_base: DEFAULT_CALENDAR_API_BASE.to_string(),
        emailjs_service_id: "service_test".to_string(),
        emailjs_template_id: "template_test".to_string(),
        emailjs_public_key: "public_test".to_string(),
        emailjs_private_key: None,
        emailjs_api_base: DEFAULT_EMAILJS_API_BASE.to_string(),
        recaptcha_secret: None,
        timezone: DEFAULT_TIMEZONE.to_string(),
        timezone_label: "Tahiti".to_string(),
        hour_start: 7,
        hour_end: 19,
        site_locale: "fr".to_string(),
        notification_locale: "fr".to_string(),
        port: 3000,
        site_dir: "./public".to_string(),
        components,
    }
}
