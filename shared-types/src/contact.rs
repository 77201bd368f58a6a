use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Group assigned to contacts created through the form when none is given.
pub const DEFAULT_CONTACT_GROUP: &str = "Default";

/// Group assigned to CSV-imported contacts without a `group`/`category` column.
pub const IMPORTED_CONTACT_GROUP: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    /// Canonical `+digits` form.
    pub phone_number: String,
    pub email: Option<String>,
    pub group: String,
    pub user_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Body of `POST /api/contacts`. Every field is optional on the wire so that
/// missing values surface as a validation error instead of a decode error.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteContactResponse {
    pub success: bool,
}

/// A distinct contact group and how many contacts it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContactGroup {
    pub group: String,
    pub contact_count: i64,
}
