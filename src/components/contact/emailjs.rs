use super::form::TemplateParams;
use super::MessageSender;
use crate::config::Config;
use crate::error::{email_error, SiteResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

/// Client for the EmailJS "send templated message" endpoint
#[derive(Debug, Clone)]
pub struct EmailJsClient {
    client: Client,
    api_base: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a TemplateParams,
}

impl EmailJsClient {
    /// Build a client from the EmailJS settings
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_base: config.emailjs_api_base.trim_end_matches('/').to_string(),
            service_id: config.emailjs_service_id.clone(),
            template_id: config.emailjs_template_id.clone(),
            public_key: config.emailjs_public_key.clone(),
            private_key: config.emailjs_private_key.clone(),
        }
    }

    fn send_url(&self) -> String {
        format!("{}/api/v1.0/email/send", self.api_base)
    }
}

#[async_trait]
impl MessageSender for EmailJsClient {
    async fn send(&self, params: &TemplateParams) -> SiteResult<()> {
        let request = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            access_token: self.private_key.as_deref(),
            template_params: params,
        };

        debug!("Sending contact request from {}", params.from_name);

        let response = self
            .client
            .post(self.send_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| email_error(&format!("Failed to reach EmailJS: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(email_error(&format!(
                "Failed to send message: HTTP {} - {}",
                status, error_body
            )));
        }

        info!("Contact request from {} sent", params.from_name);
        Ok(())
    }
}
