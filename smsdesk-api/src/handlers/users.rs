use actix_web::{web, HttpResponse, Result};
use shared_types::{SetupRequest, UserCheckResponse};
use std::sync::Arc;

use crate::database::users::{self as users_db, NewUser};
use crate::database::{Database, DbError};
use crate::error::ApiError;
use crate::helpers::passwords::hash_password;

pub async fn check_users(db: web::Data<Arc<Database>>) -> Result<HttpResponse> {
    let count = users_db::count_users(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::internal("Failed to check users", e))?;

    Ok(HttpResponse::Ok().json(UserCheckResponse {
        user_exists: count > 0,
    }))
}

/// Create the first admin account. Refused once any account exists.
pub async fn setup_user(
    db: web::Data<Arc<Database>>,
    request: web::Json<SetupRequest>,
) -> Result<HttpResponse> {
    let count = users_db::count_users(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::internal("Failed to create user", e))?;
    if count > 0 {
        return Err(ApiError::Validation("Setup already completed".to_string()).into());
    }

    let req = request.into_inner();
    let present = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let (Some(name), Some(username), Some(email), Some(password)) = (
        present(req.name),
        present(req.username),
        present(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::Validation("All fields are required".to_string()).into());
    };

    let password_hash = hash_password(password)
        .await
        .map_err(|e| ApiError::internal("Failed to create user", e))?;

    let user = users_db::insert_user(
        db.async_connection.clone(),
        &NewUser {
            name,
            username,
            email,
            password_hash,
        },
    )
    .await
    .map_err(|e| match e {
        DbError::Duplicate(column) => ApiError::Conflict(format!("{} already exists", column)),
        other => ApiError::internal("Failed to create user", other),
    })?;

    tracing::info!("Created admin account {}", user.username);

    Ok(HttpResponse::Created().json(user))
}
