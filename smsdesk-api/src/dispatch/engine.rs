use shared_types::{DispatchOutcome, Recipient};
use std::sync::Arc;
use std::time::Duration;

use crate::integrations::SmsTransport;

/// Sends one message per recipient, sequentially, with a fixed pause
/// between attempts. Built once at startup and shared by all requests.
pub struct DispatchEngine {
    transport: Arc<dyn SmsTransport>,
    send_delay: Duration,
}

impl DispatchEngine {
    pub fn new(transport: Arc<dyn SmsTransport>, send_delay: Duration) -> Self {
        Self {
            transport,
            send_delay,
        }
    }

    pub fn send_delay(&self) -> Duration {
        self.send_delay
    }

    /// Attempt every recipient exactly once.
    ///
    /// The result has one outcome per recipient, in input order. A transport
    /// failure is recorded and the batch moves on; nothing is retried.
    pub async fn dispatch(&self, body: &str, recipients: &[Recipient]) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::with_capacity(recipients.len());

        for (index, recipient) in recipients.iter().enumerate() {
            let phone = recipient.phone_number.as_str();

            let outcome = match self.transport.send(phone, body).await {
                Ok(sid) => {
                    tracing::debug!("SMS to {} accepted as {}", phone, sid);
                    DispatchOutcome::delivered(phone, sid)
                }
                Err(e) => {
                    tracing::warn!("SMS to {} failed: {}", phone, e);
                    DispatchOutcome::failed(phone, e.to_string())
                }
            };
            outcomes.push(outcome);

            if index + 1 < recipients.len() && !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }
        }

        let delivered = outcomes.iter().filter(|o| o.success).count();
        tracing::info!(
            "Dispatch finished: {} of {} recipients accepted",
            delivered,
            outcomes.len()
        );

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{recipients, ScriptedTransport};
    use std::time::Instant;

    #[tokio::test]
    async fn test_outcomes_match_recipient_order() {
        let transport = Arc::new(ScriptedTransport::failing_on(&["+2"]));
        let engine = DispatchEngine::new(transport.clone(), Duration::ZERO);

        let outcomes = engine
            .dispatch("hello", &recipients(&["+1", "+2", "+3"]))
            .await;

        assert_eq!(
            outcomes.iter().map(|o| o.success).collect::<Vec<_>>(),
            vec![true, false, true]
        );
        assert_eq!(
            outcomes
                .iter()
                .map(|o| o.phone_number.as_str())
                .collect::<Vec<_>>(),
            vec!["+1", "+2", "+3"]
        );
        assert_eq!(outcomes[0].sid.as_deref(), Some("SM-+1"));
        assert!(outcomes[1].sid.is_none());
        assert!(outcomes[1].error.as_deref().unwrap().contains("+2"));
        assert_eq!(transport.sent(), vec!["+1", "+2", "+3"]);
    }

    #[tokio::test]
    async fn test_every_recipient_attempted_once_when_all_fail() {
        let transport = Arc::new(ScriptedTransport::failing_on(&["+1", "+2", "+3", "+4"]));
        let engine = DispatchEngine::new(transport.clone(), Duration::ZERO);

        let outcomes = engine
            .dispatch("hello", &recipients(&["+1", "+2", "+3", "+4"]))
            .await;

        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|o| !o.success));
        assert_eq!(transport.sent().len(), 4);
    }

    #[tokio::test]
    async fn test_same_body_goes_to_every_recipient() {
        let transport = Arc::new(ScriptedTransport::default());
        let engine = DispatchEngine::new(transport.clone(), Duration::ZERO);

        engine.dispatch("Meeting at 5", &recipients(&["+1", "+2"])).await;

        assert_eq!(transport.bodies(), vec!["Meeting at 5", "Meeting at 5"]);
    }

    #[tokio::test]
    async fn test_pacing_between_sends() {
        let transport = Arc::new(ScriptedTransport::failing_on(&["+2"]));
        let engine = DispatchEngine::new(transport, Duration::from_millis(20));

        let started = Instant::now();
        let outcomes = engine
            .dispatch("hello", &recipients(&["+1", "+2", "+3"]))
            .await;

        assert_eq!(outcomes.len(), 3);
        // Two gaps for three sends, including after the failed one
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_empty_list_yields_no_outcomes() {
        let transport = Arc::new(ScriptedTransport::default());
        let engine = DispatchEngine::new(transport.clone(), Duration::from_millis(50));

        assert!(engine.dispatch("hello", &[]).await.is_empty());
        assert!(transport.sent().is_empty());
    }
}
