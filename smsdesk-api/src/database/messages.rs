use rusqlite::{params, Row};
use shared_types::MessageRecord;

use crate::database::{AsyncDbConnection, DbError};

const MESSAGE_COLUMNS: &str =
    "id, content, sent_by, recipient_count, success_count, failure_count, created_at";

#[derive(Debug, Clone)]
pub struct NewMessageRecord {
    pub content: String,
    pub sent_by: String,
    pub recipient_count: i64,
    pub success_count: i64,
    pub failure_count: i64,
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRecord> {
    Ok(MessageRecord {
        id: row.get(0)?,
        content: row.get(1)?,
        sent_by: row.get(2)?,
        recipient_count: row.get(3)?,
        success_count: row.get(4)?,
        failure_count: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub async fn insert_message(
    conn: AsyncDbConnection,
    message: &NewMessageRecord,
) -> Result<MessageRecord, DbError> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let record = conn.query_row(
        &format!(
            "INSERT INTO messages
             (content, sent_by, recipient_count, success_count, failure_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {MESSAGE_COLUMNS}"
        ),
        params![
            &message.content,
            &message.sent_by,
            message.recipient_count,
            message.success_count,
            message.failure_count,
            now
        ],
        message_from_row,
    )?;

    Ok(record)
}

/// Full history, newest first.
pub async fn list_messages(conn: AsyncDbConnection) -> Result<Vec<MessageRecord>, DbError> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY created_at DESC, id DESC"
    ))?;

    let messages = stmt
        .query_map([], message_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(messages)
}
