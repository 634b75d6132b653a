use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(anaparima::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(anaparima::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(anaparima::google_calendar))]
    GoogleCalendar(String),

    #[error("Email service error: {0}")]
    #[diagnostic(code(anaparima::email))]
    Email(String),

    #[error("Captcha verification error: {0}")]
    #[diagnostic(code(anaparima::captcha))]
    Captcha(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(anaparima::component))]
    Component(String),

    #[error("Template rendering error: {0}")]
    #[diagnostic(code(anaparima::template))]
    Template(String),

    #[error(transparent)]
    #[diagnostic(code(anaparima::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(anaparima::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(anaparima::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<askama::Error> for Error {
    fn from(err: askama::Error) -> Self {
        Error::Template(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SiteResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create email service errors
pub fn email_error(message: &str) -> Error {
    Error::Email(message.to_string())
}

/// Helper to create captcha verification errors
pub fn captcha_error(message: &str) -> Error {
    Error::Captcha(message.to_string())
}
