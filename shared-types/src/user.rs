use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Public view of the admin account. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminUser {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: i64,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export)]
pub struct SetupRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserCheckResponse {
    pub user_exists: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Identity carried by an authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionUser {
    /// Set when the session belongs to a stored admin account.
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LogoutResponse {
    pub success: bool,
}
