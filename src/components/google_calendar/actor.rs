use super::models::{ApiEvent, CalendarEvent, EventsResponse};
use crate::components::availability::WeekWindow;
use crate::config::Config;
use crate::error::{google_calendar_error, SiteResult};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};
use url::Url;

/// The Google Calendar actor that processes messages
pub struct GoogleCalendarActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    GetWeekEvents(WeekWindow, mpsc::Sender<SiteResult<Vec<CalendarEvent>>>),
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// Get the events of one week from the calendar
    pub async fn get_week_events(&self, week: WeekWindow) -> SiteResult<Vec<CalendarEvent>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(GoogleCalendarCommand::GetWeekEvents(week, response_tx))
            .await
            .map_err(|e| google_calendar_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| google_calendar_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SiteResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            client: Client::new(),
            command_rx,
        };

        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::GetWeekEvents(week, response_tx) => {
                    let result =
                        Self::get_week_events(Arc::clone(&self.config), self.client.clone(), week)
                            .await;
                    let _ = response_tx.send(result).await;
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }

    /// Fetch the events between the week's Monday and the following Monday
    pub async fn get_week_events(
        config: Arc<RwLock<Config>>,
        client: Client,
        week: WeekWindow,
    ) -> SiteResult<Vec<CalendarEvent>> {
        let url = {
            let config_read = config.read().await;
            build_events_url(&config_read, week)?
        };

        debug!("Fetching calendar events for week of {}", week.monday());

        // Make API request
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: EventsResponse = response.json().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse events response: {}", e))
        })?;

        let total = response_data.items.len();
        let events: Vec<CalendarEvent> = response_data
            .items
            .into_iter()
            .filter_map(ApiEvent::into_event)
            .collect();

        if events.len() < total {
            debug!("Skipped {} events without start or end", total - events.len());
        }

        Ok(events)
    }
}

/// Build the `events.list` query for one week
pub fn build_events_url(config: &Config, week: WeekWindow) -> SiteResult<Url> {
    let tz = config.tz()?;
    let (time_min, time_max) = week
        .time_range(&tz)
        .ok_or_else(|| google_calendar_error("Failed to compute the week's time range"))?;

    let url_str = format!(
        "{}/calendars/{}/events",
        config.calendar_api_base.trim_end_matches('/'),
        urlencoding::encode(&config.google_calendar_id)
    );

    let mut url = Url::parse(&url_str)
        .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

    url.query_pairs_mut()
        .append_pair("key", &config.google_api_key)
        .append_pair("timeMin", &time_min.to_rfc3339())
        .append_pair("timeMax", &time_max.to_rfc3339())
        .append_pair("singleEvents", "true")
        .append_pair("orderBy", "startTime")
        .append_pair("timeZone", &config.timezone);

    Ok(url)
}
