//! HTTP surface of the site: agenda pages, contact relay and static files.

pub mod handlers;
pub mod templates;

use crate::components::availability::OperatingWindow;
use crate::components::contact::{CaptchaVerifier, MessageSender};
use crate::components::google_calendar::EventSource;
use crate::config::Config;
use crate::error::SiteResult;
use crate::utils::i18n::Lang;
use axum::{
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use handlers::{agenda_handler, agenda_json_handler, contact_handler, health_handler};

/// Settings the handlers need on every request
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub tz: Tz,
    pub window: OperatingWindow,
    pub timezone_label: String,
    pub default_lang: Lang,
    pub notification_lang: Lang,
    pub site_dir: String,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> SiteResult<Self> {
        Ok(Self {
            tz: config.tz()?,
            window: config.operating_window()?,
            timezone_label: config.timezone_label.clone(),
            default_lang: Lang::from_code(&config.site_locale).unwrap_or_default(),
            notification_lang: Lang::from_code(&config.notification_locale).unwrap_or_default(),
            site_dir: config.site_dir.clone(),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Bookings shown on the agenda
    pub calendar: Arc<dyn EventSource>,
    /// Delivery of contact requests
    pub mailer: Arc<dyn MessageSender>,
    /// Captcha check, when configured
    pub captcha: Option<Arc<dyn CaptchaVerifier>>,
    pub settings: Arc<SiteSettings>,
}

/// Build the router
pub fn router(state: AppState) -> Router {
    let site_dir = ServeDir::new(&state.settings.site_dir);

    Router::new()
        .route("/health", get(health_handler))
        .route("/agenda", get(agenda_handler))
        .route("/api/agenda", get(agenda_json_handler))
        .route("/contact", post(contact_handler))
        // Serve the static site
        .fallback_service(site_dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
