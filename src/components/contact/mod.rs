mod captcha;
mod emailjs;
pub mod form;

pub use captcha::{RecaptchaVerifier, RECAPTCHA_VERIFY_URL};
pub use emailjs::EmailJsClient;
pub use form::{ContactError, ContactForm, TemplateParams};

use crate::config::Config;
use crate::error::SiteResult;
use crate::utils::i18n::Lang;
use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Delivery of contact requests to the studio
#[async_trait]
pub trait MessageSender: Send + Sync + 'static {
    async fn send(&self, params: &TemplateParams) -> SiteResult<()>;
}

/// Human check attached to contact requests
#[async_trait]
pub trait CaptchaVerifier: Send + Sync + 'static {
    /// Whether the token proves a completed challenge
    async fn verify(&self, token: &str) -> SiteResult<bool>;
}

/// Validate a contact request and hand it to `mailer`.
///
/// No retry: a failed send is reported and the visitor may submit again.
pub async fn submit(
    form: &ContactForm,
    mailer: &dyn MessageSender,
    captcha: Option<&dyn CaptchaVerifier>,
    submitted_at: &DateTime<Tz>,
    place: &str,
    notification_lang: Lang,
) -> Result<(), ContactError> {
    form.validate()?;

    if let Some(verifier) = captcha {
        if form.captcha_token.trim().is_empty() {
            return Err(ContactError::CaptchaRequired);
        }
        match verifier.verify(form.captcha_token.trim()).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Rejected contact request with an invalid captcha");
                return Err(ContactError::CaptchaRequired);
            }
            Err(e) => {
                error!("Captcha verification failed: {}", e);
                return Err(ContactError::SendFailed(e));
            }
        }
    }

    let params = TemplateParams::from_form(form, submitted_at, place, notification_lang);
    mailer.send(&params).await.map_err(|e| {
        error!("Failed to send contact request: {}", e);
        ContactError::SendFailed(e)
    })
}

/// Contact form component relaying requests through EmailJS
#[derive(Default)]
pub struct Contact {
    mailer: RwLock<Option<EmailJsClient>>,
    captcha: RwLock<Option<RecaptchaVerifier>>,
}

impl Contact {
    /// Create a new contact component
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mail client if the component was initialized
    pub async fn get_mailer(&self) -> Option<EmailJsClient> {
        self.mailer.read().await.clone()
    }

    /// Get the captcha verifier if a secret is configured
    pub async fn get_captcha(&self) -> Option<RecaptchaVerifier> {
        self.captcha.read().await.clone()
    }
}

#[async_trait]
impl super::Component for Contact {
    fn name(&self) -> &'static str {
        "contact"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> SiteResult<()> {
        let config_read = config.read().await;

        *self.mailer.write().await = Some(EmailJsClient::from_config(&config_read));

        match &config_read.recaptcha_secret {
            Some(secret) => {
                *self.captcha.write().await = Some(RecaptchaVerifier::new(secret.clone()));
            }
            None => info!("No RECAPTCHA_SECRET configured, captcha verification disabled"),
        }

        Ok(())
    }

    async fn shutdown(&self) -> SiteResult<()> {
        *self.mailer.write().await = None;
        *self.captcha.write().await = None;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
