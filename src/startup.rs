use crate::components::availability::WeekWindow;
use crate::components::contact::{CaptchaVerifier, Contact, MessageSender, TemplateParams};
use crate::components::google_calendar::{CalendarEvent, EventSource, GoogleCalendar};
use crate::components::ComponentManager;
use crate::config::Config;
use crate::error::{component_error, Error, SiteResult};
use crate::shutdown;
use crate::web::{self, AppState, SiteSettings};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Stand-in for a component that is disabled or failed to start
struct Unavailable(&'static str);

#[async_trait]
impl EventSource for Unavailable {
    async fn week_events(&self, _week: WeekWindow) -> SiteResult<Vec<CalendarEvent>> {
        Err(component_error(&format!("{} is not available", self.0)))
    }
}

#[async_trait]
impl MessageSender for Unavailable {
    async fn send(&self, _params: &TemplateParams) -> SiteResult<()> {
        Err(component_error(&format!("{} is not available", self.0)))
    }
}

/// Build the request state from the initialized components
async fn build_state(
    component_manager: &ComponentManager,
    settings: SiteSettings,
) -> AppState {
    let calendar: Arc<dyn EventSource> = match component_manager.get::<GoogleCalendar>("google_calendar") {
        Some(component) => match component.get_handle().await {
            Some(handle) => Arc::new(handle),
            None => Arc::new(Unavailable("google_calendar")),
        },
        None => {
            warn!("Google Calendar component disabled, the agenda will show its error panel");
            Arc::new(Unavailable("google_calendar"))
        }
    };

    let (mailer, captcha): (Arc<dyn MessageSender>, Option<Arc<dyn CaptchaVerifier>>) =
        match component_manager.get::<Contact>("contact") {
            Some(component) => {
                let mailer: Arc<dyn MessageSender> = match component.get_mailer().await {
                    Some(mailer) => Arc::new(mailer),
                    None => Arc::new(Unavailable("contact")),
                };
                let captcha = component
                    .get_captcha()
                    .await
                    .map(|verifier| Arc::new(verifier) as Arc<dyn CaptchaVerifier>);
                (mailer, captcha)
            }
            None => {
                warn!("Contact component disabled, submissions will be refused");
                (Arc::new(Unavailable("contact")), None)
            }
        };

    AppState {
        calendar,
        mailer,
        captcha,
        settings: Arc::new(settings),
    }
}

/// Initialize the components and run the HTTP server until shutdown
pub async fn start_server(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let (settings, port) = {
        let config_read = config.read().await;

        // Set locale from config
        crate::utils::i18n::set_locale(&config_read.site_locale);
        info!("Setting locale to {}", config_read.site_locale);

        (SiteSettings::from_config(&config_read)?, config_read.port)
    };

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    {
        let config_read = config.read().await;
        if config_read.is_component_enabled("google_calendar") {
            component_manager.register(GoogleCalendar::new());
        }
        if config_read.is_component_enabled("contact") {
            component_manager.register(Contact::new());
        }
    }

    component_manager.init_all().await?;

    // Create a shared component manager
    let component_manager = Arc::new(component_manager);

    let state = build_state(&component_manager, settings).await;
    let app = web::router(state);

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    // Bind to address and run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_recv.await;
            info!("Received shutdown signal, stopping server...");
        })
        .await
        .map_err(Error::from)?;

    info!("Server stopped");
    Ok(())
}
