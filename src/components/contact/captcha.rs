use super::CaptchaVerifier;
use crate::error::{captcha_error, SiteResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Default reCAPTCHA verification endpoint
pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Server-side check of reCAPTCHA tokens
#[derive(Debug, Clone)]
pub struct RecaptchaVerifier {
    client: Client,
    secret: String,
    verify_url: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl RecaptchaVerifier {
    pub fn new(secret: String) -> Self {
        Self {
            client: Client::new(),
            secret,
            verify_url: RECAPTCHA_VERIFY_URL.to_string(),
        }
    }

    /// Point the verifier at another endpoint
    pub fn with_verify_url(mut self, verify_url: String) -> Self {
        self.verify_url = verify_url;
        self
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> SiteResult<bool> {
        let params = [("secret", self.secret.as_str()), ("response", token)];

        let response = self
            .client
            .post(&self.verify_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| captcha_error(&format!("Failed to reach verification service: {}", e)))?;

        if !response.status().is_success() {
            return Err(captcha_error(&format!(
                "Verification failed: HTTP {}",
                response.status()
            )));
        }

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| captcha_error(&format!("Failed to parse verification response: {}", e)))?;

        if !body.success {
            tracing::debug!("Captcha rejected: {:?}", body.error_codes);
        }

        Ok(body.success)
    }
}
