use super::templates::AgendaTemplate;
use super::AppState;
use crate::components::availability::{DayAvailability, WeekAvailability, WeekWindow};
use crate::components::contact::{self, ContactForm};
use crate::utils::i18n::{text, Lang};
use crate::error::Error;
use crate::utils::time::{format_date, now_in, parse_date, today_in};
use askama::Template;
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Query parameters of the agenda routes
#[derive(Debug, Default, Deserialize)]
pub struct AgendaQuery {
    /// Any date of the requested week, YYYY-MM-DD
    pub week: Option<String>,
    pub lang: Option<String>,
}

/// Query parameters of the contact route
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// JSON body of the agenda API
#[derive(Debug, Serialize)]
pub struct AgendaResponse {
    pub week_start: String,
    pub label: String,
    pub can_go_back: bool,
    pub previous_week: Option<String>,
    pub next_week: String,
    pub days: Vec<DayAvailability>,
}

/// JSON body of the contact route
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Week requested by the visitor, never earlier than the current one
pub fn resolve_week(requested: Option<&str>, today: NaiveDate) -> WeekWindow {
    match requested.map(|raw| (raw, parse_date(raw))) {
        Some((_, Some(date))) => WeekWindow::containing(date).clamp_to(today),
        Some((raw, None)) => {
            warn!("Ignoring malformed week parameter: {}", raw);
            WeekWindow::current(today)
        }
        None => WeekWindow::current(today),
    }
}

/// Fetch and compute the requested week
async fn load_week(
    state: &AppState,
    week: WeekWindow,
    today: NaiveDate,
) -> Result<WeekAvailability, Error> {
    let settings = &state.settings;
    let events = state.calendar.week_events(week).await?;
    Ok(WeekAvailability::build(
        week,
        &events,
        today,
        settings.window,
        &settings.tz,
    ))
}

fn render(page: AgendaTemplate, status: StatusCode) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render agenda: {}", Error::from(e));
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Handler for the agenda fragment
pub async fn agenda_handler(
    State(state): State<AppState>,
    Query(query): Query<AgendaQuery>,
) -> Response {
    let settings = &state.settings;
    let lang = Lang::from_code_or(query.lang.as_deref(), settings.default_lang);
    let today = today_in(&settings.tz);
    let week = resolve_week(query.week.as_deref(), today);

    match load_week(&state, week, today).await {
        Ok(availability) => render(
            AgendaTemplate::week(&availability, lang, today),
            StatusCode::OK,
        ),
        Err(e) => {
            error!("Failed to load agenda for week of {}: {}", week.monday(), e);
            render(
                AgendaTemplate::error(week, lang, today),
                StatusCode::BAD_GATEWAY,
            )
        }
    }
}

/// Handler for the agenda as JSON
pub async fn agenda_json_handler(
    State(state): State<AppState>,
    Query(query): Query<AgendaQuery>,
) -> Response {
    let settings = &state.settings;
    let lang = Lang::from_code_or(query.lang.as_deref(), settings.default_lang);
    let today = today_in(&settings.tz);
    let week = resolve_week(query.week.as_deref(), today);

    match load_week(&state, week, today).await {
        Ok(availability) => {
            let can_go_back = week.can_go_back(today);
            Json(AgendaResponse {
                week_start: format_date(week.monday()),
                label: week.label(lang),
                can_go_back,
                previous_week: can_go_back.then(|| format_date(week.previous(today).monday())),
                next_week: format_date(week.next().monday()),
                days: availability.days,
            })
            .into_response()
        }
        Err(e) => {
            error!("Failed to load agenda for week of {}: {}", week.monday(), e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: text("agenda_error", lang),
                }),
            )
                .into_response()
        }
    }
}

/// Handler for contact form submissions
pub async fn contact_handler(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    let settings = &state.settings;
    let lang = Lang::from_code_or(query.lang.as_deref(), settings.default_lang);
    let submitted_at = now_in(&settings.tz);

    let result = contact::submit(
        &form,
        state.mailer.as_ref(),
        state.captcha.as_deref(),
        &submitted_at,
        &settings.timezone_label,
        settings.notification_lang,
    )
    .await;

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ContactResponse {
                success: true,
                message: text("contact_sent", lang),
            }),
        ),
        Err(e) => {
            let status = if e.is_validation() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::BAD_GATEWAY
            };
            (
                status,
                Json(ContactResponse {
                    success: false,
                    message: e.message(lang),
                }),
            )
        }
    }
}

// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}
