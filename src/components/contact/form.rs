use crate::error::Error;
use crate::utils::i18n::{long_date, text, Lang};
use crate::utils::time::format_clock;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields posted by the contact form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Visible label of the selected service
    pub service: String,
    pub message: String,
    #[serde(rename = "g-recaptcha-response")]
    pub captcha_token: String,
}

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("name is missing")]
    MissingName,

    #[error("neither phone nor email was given")]
    MissingContact,

    #[error("captcha was not completed")]
    CaptchaRequired,

    #[error("message could not be sent: {0}")]
    SendFailed(#[source] Error),
}

impl ContactError {
    /// Message shown next to the form
    pub fn message(&self, lang: Lang) -> String {
        let key = match self {
            ContactError::MissingName => "contact_missing_name",
            ContactError::MissingContact => "contact_missing_contact",
            ContactError::CaptchaRequired => "contact_captcha_required",
            ContactError::SendFailed(_) => "contact_send_failed",
        };
        text(key, lang)
    }

    /// Whether the visitor can fix the problem by editing the form
    pub fn is_validation(&self) -> bool {
        !matches!(self, ContactError::SendFailed(_))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ContactForm {
    /// Check the required fields, in the order the visitor sees them
    pub fn validate(&self) -> Result<(), ContactError> {
        if is_blank(&self.name) {
            return Err(ContactError::MissingName);
        }
        if is_blank(&self.phone) && is_blank(&self.email) {
            return Err(ContactError::MissingContact);
        }
        Ok(())
    }
}

/// Named fields of the email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub message: String,
    pub date: String,
    pub time: String,
}

impl TemplateParams {
    /// Fill the template fields for a validated form.
    ///
    /// Placeholder texts and date formats use `lang`, the language the
    /// studio reads its mail in.
    pub fn from_form(
        form: &ContactForm,
        submitted_at: &DateTime<Tz>,
        place: &str,
        lang: Lang,
    ) -> Self {
        let or_text = |value: &str, key: &str| {
            if is_blank(value) {
                text(key, lang)
            } else {
                value.trim().to_string()
            }
        };

        Self {
            from_name: form.name.trim().to_string(),
            phone: or_text(&form.phone, "contact_not_provided"),
            email: or_text(&form.email, "contact_not_provided"),
            service: or_text(&form.service, "contact_no_service"),
            // Only an empty message is replaced; anything typed is relayed as is
            message: if form.message.is_empty() {
                text("contact_no_message", lang)
            } else {
                form.message.clone()
            },
            date: long_date(submitted_at.date_naive(), lang),
            time: t!(
                "contact_local_time",
                locale = lang.code(),
                time = format_clock(submitted_at),
                place = place
            )
            .into_owned(),
        }
    }
}
