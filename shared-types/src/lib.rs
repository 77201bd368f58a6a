use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod contact;
pub mod import;
pub mod message;
pub mod user;

pub use contact::{
    Contact, ContactGroup, CreateContactRequest, DeleteContactResponse, UpdateContactRequest,
    DEFAULT_CONTACT_GROUP, IMPORTED_CONTACT_GROUP,
};
pub use import::{ImportRowFailure, ImportSummary};
pub use message::{
    DispatchOutcome, MessageRecord, Recipient, SendSmsRequest, SendSmsResponse, ALL_GROUPS,
    UNKNOWN_SENDER,
};
pub use user::{
    AdminUser, LoginRequest, LogoutResponse, SessionUser, SetupRequest, UserCheckResponse,
};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
