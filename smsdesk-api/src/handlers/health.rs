use actix_web::{web, HttpResponse, Result};
use std::sync::Arc;

use crate::database::Database;
use crate::error::ApiError;

pub async fn health(db: web::Data<Arc<Database>>) -> Result<HttpResponse> {
    db.ping()
        .await
        .map_err(|e| ApiError::internal("Database unavailable", e))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "database": "connected"
    })))
}
