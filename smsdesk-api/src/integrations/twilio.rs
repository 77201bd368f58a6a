use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::{TwilioConfig, DEFAULT_TWILIO_API_BASE, DEFAULT_TWILIO_TIMEOUT_SECS};
use crate::integrations::sms::{SmsTransport, TransportError};

/// Twilio Programmable Messaging over its REST API.
pub struct TwilioClient {
    http: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Deserialize)]
struct CreatedMessage {
    sid: String,
}

#[derive(Deserialize)]
struct TwilioErrorBody {
    message: Option<String>,
    code: Option<i64>,
}

impl TwilioClient {
    pub fn new(
        api_base: &str,
        account_sid: &str,
        auth_token: &str,
        from_number: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
        })
    }

    /// `Ok(None)` when any of sid, token or sender number is missing.
    pub fn from_config(config: &TwilioConfig) -> anyhow::Result<Option<Self>> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|s| !s.trim().is_empty())
        }

        let (Some(sid), Some(token), Some(from)) = (
            present(&config.account_sid),
            present(&config.auth_token),
            present(&config.from_number),
        ) else {
            return Ok(None);
        };

        let api_base = config.api_base.as_deref().unwrap_or(DEFAULT_TWILIO_API_BASE);
        let timeout = Duration::from_secs(
            config
                .request_timeout_secs
                .unwrap_or(DEFAULT_TWILIO_TIMEOUT_SECS),
        );

        Self::new(api_base, sid, token, from, timeout).map(Some)
    }

    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        )
    }
}

#[async_trait]
impl SmsTransport for TwilioClient {
    async fn send(&self, to: &str, body: &str) -> Result<String, TransportError> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from_number.as_str()), ("Body", body)])
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let created: CreatedMessage = response
                .json()
                .await
                .map_err(|e| TransportError::Request(format!("Invalid provider response: {}", e)))?;
            return Ok(created.sid);
        }

        let message = match response.json::<TwilioErrorBody>().await {
            Ok(TwilioErrorBody {
                message: Some(message),
                code: Some(code),
            }) => format!("{} (code {})", message, code),
            Ok(TwilioErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ => format!("Provider returned HTTP {}", status.as_u16()),
        };

        Err(TransportError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
