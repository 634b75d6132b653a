use anaparima::components::contact::{
    self, CaptchaVerifier, ContactError, ContactForm, EmailJsClient, MessageSender,
    RecaptchaVerifier, TemplateParams,
};
use anaparima::config::Config;
use anaparima::utils::i18n::Lang;
use chrono::TimeZone;
use std::collections::HashMap;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(emailjs_api_base: String, private_key: Option<String>) -> Config {
    Config {
        google_api_key: "test_api_key".to_string(),
        google_calendar_id: "studio-calendar".to_string(),
        calendar_api_base: "http://127.0.0.1:9".to_string(),
        emailjs_service_id: "service_test".to_string(),
        emailjs_template_id: "template_test".to_string(),
        emailjs_public_key: "public_test".to_string(),
        emailjs_private_key: private_key,
        emailjs_api_base,
        recaptcha_secret: None,
        timezone: "Pacific/Tahiti".to_string(),
        timezone_label: "Tahiti".to_string(),
        hour_start: 7,
        hour_end: 19,
        site_locale: "fr".to_string(),
        notification_locale: "fr".to_string(),
        port: 0,
        site_dir: "./public".to_string(),
        components: HashMap::new(),
    }
}

fn params() -> TemplateParams {
    TemplateParams {
        from_name: "Hina".to_string(),
        phone: "89 51 53 62".to_string(),
        email: "Non renseigné".to_string(),
        service: "Massage relaxant".to_string(),
        message: "Aucun message".to_string(),
        date: "lundi 19 octobre 2026".to_string(),
        time: "09:30 (heure de Tahiti)".to_string(),
    }
}

#[tokio::test]
async fn test_send_posts_template_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .and(body_partial_json(serde_json::json!({
            "service_id": "service_test",
            "template_id": "template_test",
            "user_id": "public_test",
            "accessToken": "private_test",
            "template_params": {
                "from_name": "Hina",
                "phone": "89 51 53 62",
                "service": "Massage relaxant",
                "date": "lundi 19 octobre 2026",
                "time": "09:30 (heure de Tahiti)"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EmailJsClient::from_config(&test_config(
        mock_server.uri(),
        Some("private_test".to_string()),
    ));
    client.send(&params()).await.unwrap();
}

#[tokio::test]
async fn test_send_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(400).set_body_string("The template ID is invalid"))
        .mount(&mock_server)
        .await;

    let client = EmailJsClient::from_config(&test_config(mock_server.uri(), None));
    let err = client.send(&params()).await.unwrap_err();
    assert!(err.to_string().contains("400"));
}

#[tokio::test]
async fn test_submit_through_emailjs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .and(body_partial_json(serde_json::json!({
            "template_params": {
                "from_name": "Hina",
                "email": "hina@example.com",
                "phone": "Non renseigné",
                "message": "Aucun message"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EmailJsClient::from_config(&test_config(mock_server.uri(), None));
    let form = ContactForm {
        name: " Hina ".to_string(),
        email: "hina@example.com".to_string(),
        ..Default::default()
    };
    let submitted_at = chrono_tz::Pacific::Tahiti
        .with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .unwrap();

    contact::submit(&form, &client, None, &submitted_at, "Tahiti", Lang::Fr)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_recaptcha_verifier() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/siteverify"))
        .and(body_string_contains("response=good-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/siteverify"))
        .and(body_string_contains("response=bad-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error-codes": ["invalid-input-response"]
        })))
        .mount(&mock_server)
        .await;

    let verifier = RecaptchaVerifier::new("secret".to_string())
        .with_verify_url(format!("{}/siteverify", mock_server.uri()));

    assert!(verifier.verify("good-token").await.unwrap());
    assert!(!verifier.verify("bad-token").await.unwrap());

    // A rejected token never reaches the mail service
    let form = ContactForm {
        name: "Hina".to_string(),
        phone: "89 51 53 62".to_string(),
        captcha_token: "bad-token".to_string(),
        ..Default::default()
    };
    let unreachable = EmailJsClient::from_config(&test_config("http://127.0.0.1:9".to_string(), None));
    let submitted_at = chrono_tz::Pacific::Tahiti
        .with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .unwrap();
    let result = contact::submit(
        &form,
        &unreachable,
        Some(&verifier),
        &submitted_at,
        "Tahiti",
        Lang::En,
    )
    .await;
    assert!(matches!(result, Err(ContactError::CaptchaRequired)));
}
