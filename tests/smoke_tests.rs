use anaparima::components::availability::{WeekAvailability, WeekWindow};
use anaparima::components::contact::Contact;
use anaparima::components::google_calendar::{CalendarEvent, GoogleCalendar};
use anaparima::components::ComponentManager;
use anaparima::config::Config;
use chrono::{DateTime, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

fn test_config() -> Config {
    Config {
        google_api_key: "test_api_key".to_string(),
        google_calendar_id: "studio-calendar".to_string(),
        calendar_api_base: "http://127.0.0.1:9".to_string(),
        emailjs_service_id: "service_test".to_string(),
        emailjs_template_id: "template_test".to_string(),
        emailjs_public_key: "public_test".to_string(),
        emailjs_private_key: None,
        emailjs_api_base: "http://127.0.0.1:9".to_string(),
        recaptcha_secret: Some("secret".to_string()),
        timezone: "Pacific/Tahiti".to_string(),
        timezone_label: "Tahiti".to_string(),
        hour_start: 7,
        hour_end: 19,
        site_locale: "fr".to_string(),
        notification_locale: "fr".to_string(),
        port: 0,
        site_dir: "./public".to_string(),
        components: HashMap::new(),
    }
}

/// Smoke test to verify that the config exposes its derived settings
#[tokio::test]
async fn test_config_loads() {
    let mut config = test_config();
    assert!(!config.is_component_enabled("google_calendar"));

    config.components.insert("google_calendar".to_string(), true);
    assert!(config.is_component_enabled("google_calendar"));
    assert_eq!(config.tz().unwrap(), chrono_tz::Pacific::Tahiti);
    let window = config.operating_window().unwrap();
    assert_eq!(window.hours(), 7..19);
}

/// Smoke test for component registration and lifecycle
#[tokio::test]
async fn test_components_lifecycle() {
    let config = Arc::new(RwLock::new(test_config()));
    let mut manager = ComponentManager::new(Arc::clone(&config));
    manager.register(GoogleCalendar::new());
    manager.register(Contact::new());

    manager.init_all().await.unwrap();

    let calendar = manager
        .get::<GoogleCalendar>("google_calendar")
        .expect("calendar registered");
    assert!(calendar.get_handle().await.is_some());

    let contact = manager.get::<Contact>("contact").expect("contact registered");
    assert!(contact.get_mailer().await.is_some());
    assert!(contact.get_captcha().await.is_some());

    manager.shutdown_all().await.unwrap();
}

/// Test a full week computed from in-memory events
#[tokio::test]
async fn test_week_from_events() {
    let events = vec![
        CalendarEvent::timed(
            "event1",
            DateTime::parse_from_rfc3339("2099-06-09T14:00:00-10:00").unwrap(),
            DateTime::parse_from_rfc3339("2099-06-09T15:00:00-10:00").unwrap(),
        ),
        CalendarEvent::all_day(
            "event2",
            NaiveDate::from_ymd_opt(2099, 6, 13).unwrap(),
            NaiveDate::from_ymd_opt(2099, 6, 14).unwrap(),
        ),
    ];

    let week = WeekWindow::containing(NaiveDate::from_ymd_opt(2099, 6, 9).unwrap());
    let availability = WeekAvailability::build(
        week,
        &events,
        NaiveDate::from_ymd_opt(2099, 6, 1).unwrap(),
        Default::default(),
        &chrono_tz::Pacific::Tahiti,
    );

    assert_eq!(availability.days.len(), 7);
    assert_eq!(availability.days[1].slots.len(), 3);
    assert!(availability.days[5].slots.iter().all(|slot| slot.busy));
    assert!(availability.days[6].slots.iter().all(|slot| !slot.busy));
}
