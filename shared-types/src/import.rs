use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Result of `POST /api/contacts/import`.
#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImportSummary {
    pub message: String,
    /// Contacts created.
    pub count: usize,
    /// Rows with neither a name nor a phone number.
    pub skipped: usize,
    pub failed: Vec<ImportRowFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImportRowFailure {
    /// Line in the uploaded file; the header is line 1.
    pub line: u64,
    pub error: String,
}
