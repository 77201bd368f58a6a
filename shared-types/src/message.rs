use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Group selector that matches every contact.
pub const ALL_GROUPS: &str = "all";

/// Sender recorded when the session carries no email.
pub const UNKNOWN_SENDER: &str = "unknown";

/// One entry of the sent-message history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MessageRecord {
    pub id: i64,
    pub content: String,
    pub sent_by: String,
    pub recipient_count: i64,
    pub success_count: i64,
    pub failure_count: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Recipient {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `POST /api/send-sms`.
///
/// Either `recipients` is given explicitly, or `group` selects stored
/// contacts (`"all"` or an exact group name). An explicit list wins.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SendSmsRequest {
    pub message: Option<String>,
    pub recipients: Option<Vec<Recipient>>,
    pub group: Option<String>,
}

/// Per-recipient result of a dispatch batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DispatchOutcome {
    pub success: bool,
    pub phone_number: String,
    /// Provider-assigned message id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn delivered(phone_number: impl Into<String>, sid: impl Into<String>) -> Self {
        Self {
            success: true,
            phone_number: phone_number.into(),
            sid: Some(sid.into()),
            error: None,
        }
    }

    pub fn failed(phone_number: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            phone_number: phone_number.into(),
            sid: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SendSmsResponse {
    pub results: Vec<DispatchOutcome>,
}
