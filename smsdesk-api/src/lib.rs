pub mod config;
pub mod database;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod integrations;

#[cfg(test)]
mod test_support;

pub use database::Database;

use actix_web::web;

use crate::error::ApiError;

/// Register every `/api` route. Shared by the server and the tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected JSON body: {}", err);
        ApiError::Validation(format!("Invalid request body: {}", err)).into()
    }))
    .route("/api/health", web::get().to(handlers::health::health))
    .route("/api/users/check", web::get().to(handlers::users::check_users))
    .route("/api/users/setup", web::post().to(handlers::users::setup_user))
    .route("/api/auth/login", web::post().to(handlers::auth::login))
    .route("/api/auth/logout", web::post().to(handlers::auth::logout))
    .route("/api/auth/session", web::get().to(handlers::auth::current_session))
    .route("/api/contacts", web::get().to(handlers::contacts::list_contacts))
    .route("/api/contacts", web::post().to(handlers::contacts::create_contact))
    .route("/api/contacts/groups", web::get().to(handlers::contacts::list_groups))
    .route("/api/contacts/import", web::post().to(handlers::import::import_contacts))
    .route("/api/contacts/{id}", web::get().to(handlers::contacts::get_contact))
    .route("/api/contacts/{id}", web::put().to(handlers::contacts::update_contact))
    .route("/api/contacts/{id}", web::delete().to(handlers::contacts::delete_contact))
    .route("/api/messages", web::get().to(handlers::messages::list_messages))
    .route("/api/send-sms", web::post().to(handlers::sms::send_sms));
}
