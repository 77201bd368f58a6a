use async_trait::async_trait;
use std::sync::Arc;

use crate::config::TwilioConfig;
use crate::integrations::twilio::TwilioClient;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The provider answered and refused the message.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a provider answer (DNS, TLS, timeout, bad body).
    #[error("SMS request failed: {0}")]
    Request(String),

    #[error("SMS provider is not configured")]
    NotConfigured,
}

/// Outbound one-way SMS delivery.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Send `body` to `to` and return the provider-assigned message id.
    async fn send(&self, to: &str, body: &str) -> Result<String, TransportError>;
}

/// Stand-in used when no provider credentials are configured; every send fails.
pub struct DisabledTransport;

#[async_trait]
impl SmsTransport for DisabledTransport {
    async fn send(&self, _to: &str, _body: &str) -> Result<String, TransportError> {
        Err(TransportError::NotConfigured)
    }
}

/// Build the process-wide transport from config.
pub fn build_transport(config: Option<&TwilioConfig>) -> anyhow::Result<Arc<dyn SmsTransport>> {
    match config.map(TwilioClient::from_config).transpose()?.flatten() {
        Some(client) => {
            tracing::info!("SMS transport: Twilio (from {})", client.from_number());
            Ok(Arc::new(client))
        }
        None => {
            tracing::warn!("Twilio credentials are not configured; every SMS send will fail");
            Ok(Arc::new(DisabledTransport))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_transport_always_fails() {
        let transport = DisabledTransport;
        let err = transport.send("+15550001", "hi").await.unwrap_err();
        assert!(matches!(err, TransportError::NotConfigured));
        assert_eq!(err.to_string(), "SMS provider is not configured");
    }

    #[test]
    fn test_build_without_config_is_disabled() {
        assert!(build_transport(None).is_ok());

        let partial = TwilioConfig {
            account_sid: Some("AC123".to_string()),
            ..Default::default()
        };
        assert!(build_transport(Some(&partial)).is_ok());
    }
}
