pub mod auth;
pub mod contacts;
pub mod health;
pub mod import;
pub mod messages;
pub mod sms;
pub mod users;

pub use auth::AdminSession;
