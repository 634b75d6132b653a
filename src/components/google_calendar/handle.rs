use super::actor::{GoogleCalendarActor, GoogleCalendarActorHandle};
use super::models::CalendarEvent;
use super::EventSource;
use crate::components::availability::WeekWindow;
use crate::config::Config;
use crate::error::SiteResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarHandle {
    actor_handle: GoogleCalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GoogleCalendarHandle {
    /// Create a new GoogleCalendarHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = GoogleCalendarActor::new(config);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Get the events of one week from the calendar
    pub async fn get_week_events(&self, week: WeekWindow) -> SiteResult<Vec<CalendarEvent>> {
        self.actor_handle.get_week_events(week).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SiteResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl EventSource for GoogleCalendarHandle {
    async fn week_events(&self, week: WeekWindow) -> SiteResult<Vec<CalendarEvent>> {
        self.get_week_events(week).await
    }
}
