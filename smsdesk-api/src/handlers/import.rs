use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result};
use extractors::{ContactCsvParser, ParsedRow};
use futures::StreamExt;
use shared_types::{ImportRowFailure, ImportSummary};
use std::sync::Arc;

use crate::database::contacts::{self as contacts_db, NewContact};
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::AdminSession;

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const UPLOAD_FIELD: &str = "file";
const NO_FILE_UPLOADED: &str = "No file uploaded";

/// Pull the bytes of the `file` field out of a multipart body.
async fn read_upload(mut payload: Multipart) -> std::result::Result<Vec<u8>, ApiError> {
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| {
            tracing::warn!("Malformed multipart upload: {}", e);
            ApiError::Validation(NO_FILE_UPLOADED.to_string())
        })?;

        if field.content_disposition().get_name() != Some(UPLOAD_FIELD) {
            // Drain so the stream can advance to the next part
            while let Some(Ok(_)) = field.next().await {}
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::warn!("Failed to read uploaded file: {}", e);
                ApiError::Validation(NO_FILE_UPLOADED.to_string())
            })?;
            if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(ApiError::Validation(format!(
                    "File exceeds maximum size of {} bytes",
                    MAX_UPLOAD_BYTES
                )));
            }
            data.extend_from_slice(&chunk);
        }
        return Ok(data);
    }

    Err(ApiError::Validation(NO_FILE_UPLOADED.to_string()))
}

/// Import contacts from an uploaded CSV.
///
/// Each row is stored on its own: one bad row is reported in `failed` and
/// the rest of the file still goes in.
pub async fn import_contacts(
    session: AdminSession,
    db: web::Data<Arc<Database>>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let content = read_upload(payload).await?;

    let rows = ContactCsvParser::new()
        .parse(&content, session.user.id)
        .map_err(|e| {
            tracing::warn!("Rejected contact import: {}", e);
            ApiError::Validation("CSV file is empty or invalid".to_string())
        })?;

    let mut count = 0usize;
    let mut skipped = 0usize;
    let mut failed = Vec::new();

    for row in rows {
        let line = row.line();
        let candidate = match row {
            ParsedRow::Contact { candidate, .. } => candidate,
            ParsedRow::Skipped { .. } => {
                skipped += 1;
                continue;
            }
        };

        if candidate.name.is_empty() || !candidate.has_phone() {
            failed.push(ImportRowFailure {
                line,
                error: "Name and phone number are required".to_string(),
            });
            continue;
        }

        let contact = NewContact {
            name: candidate.name,
            phone_number: candidate.phone_number,
            email: candidate.email,
            group: candidate.group,
            user_id: candidate.user_id,
        };

        match contacts_db::insert_contact(db.async_connection.clone(), &contact).await {
            Ok(_) => count += 1,
            Err(e) => {
                tracing::error!("Failed to import CSV line {}: {}", line, e);
                failed.push(ImportRowFailure {
                    line,
                    error: "Failed to save contact".to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Contact import finished: {} imported, {} skipped, {} failed",
        count,
        skipped,
        failed.len()
    );

    Ok(HttpResponse::Ok().json(ImportSummary {
        message: format!("Successfully imported {} contacts", count),
        count,
        skipped,
        failed,
    }))
}
