use actix_web::{web, HttpResponse, Result};
use shared_types::{Recipient, SendSmsRequest, SendSmsResponse};
use std::sync::Arc;

use crate::database::Database;
use crate::dispatch::{record_dispatch, select_recipients, DispatchEngine};
use crate::error::ApiError;
use crate::handlers::AdminSession;

const MESSAGE_AND_RECIPIENTS_REQUIRED: &str = "Message and recipients are required";

/// Who to send to: an explicit non-empty list wins over a group filter.
async fn resolve_recipients(
    db: &Database,
    recipients: Option<Vec<Recipient>>,
    group: Option<String>,
) -> std::result::Result<Vec<Recipient>, ApiError> {
    let explicit: Vec<Recipient> = recipients
        .unwrap_or_default()
        .into_iter()
        .filter(|r| !r.phone_number.trim().is_empty())
        .collect();
    if !explicit.is_empty() {
        return Ok(explicit);
    }

    match group.filter(|g| !g.trim().is_empty()) {
        Some(group) => select_recipients(db.async_connection.clone(), group.trim())
            .await
            .map_err(|e| ApiError::internal("Failed to load recipients", e)),
        None => Ok(Vec::new()),
    }
}

/// Send one body to every recipient and log the batch.
///
/// Per-recipient failures are reported in the results, not as an HTTP
/// error. Only a failure to write the history record fails the request.
pub async fn send_sms(
    session: AdminSession,
    db: web::Data<Arc<Database>>,
    engine: web::Data<Arc<DispatchEngine>>,
    request: web::Json<SendSmsRequest>,
) -> Result<HttpResponse> {
    let req = request.into_inner();

    let Some(body) = req.message.filter(|m| !m.is_empty()) else {
        return Err(ApiError::Validation(MESSAGE_AND_RECIPIENTS_REQUIRED.to_string()).into());
    };

    let recipients = resolve_recipients(&db, req.recipients, req.group).await?;
    if recipients.is_empty() {
        return Err(ApiError::Validation(MESSAGE_AND_RECIPIENTS_REQUIRED.to_string()).into());
    }

    tracing::info!(
        "{} dispatching SMS to {} recipients",
        session.user.name,
        recipients.len()
    );

    let results = engine.dispatch(&body, &recipients).await;

    record_dispatch(
        db.async_connection.clone(),
        &body,
        session.user.email.as_deref(),
        recipients.len(),
        &results,
    )
    .await
    .map_err(|e| ApiError::internal("Failed to send messages", e))?;

    Ok(HttpResponse::Ok().json(SendSmsResponse { results }))
}
