mod actor;
mod handle;
pub mod models;
pub mod time;

pub use actor::build_events_url;
pub use handle::GoogleCalendarHandle;
pub use models::{CalendarEvent, EventTime};

use crate::components::availability::WeekWindow;
use crate::config::Config;
use crate::error::{component_error, SiteResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Source of the bookings shown on the agenda
#[async_trait]
pub trait EventSource: Send + Sync + 'static {
    /// Events starting between the week's Monday and the following Monday
    async fn week_events(&self, week: WeekWindow) -> SiteResult<Vec<CalendarEvent>>;
}

/// Google Calendar component feeding the availability agenda
#[derive(Default)]
pub struct GoogleCalendar {
    handle: RwLock<Option<GoogleCalendarHandle>>,
}

impl GoogleCalendar {
    /// Create a new Google Calendar component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<GoogleCalendarHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for GoogleCalendar {
    fn name(&self) -> &'static str {
        "google_calendar"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> SiteResult<()> {
        {
            let config_read = config.read().await;
            if config_read.google_calendar_id.trim().is_empty() {
                return Err(component_error("GOOGLE_CALENDAR_ID is empty"));
            }
        }

        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            *handle_lock = Some(GoogleCalendarHandle::new(config));
        }

        Ok(())
    }

    async fn shutdown(&self) -> SiteResult<()> {
        // Shutdown the handle if it exists
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
