use shared_types::{DispatchOutcome, MessageRecord, UNKNOWN_SENDER};

use crate::database::messages::{insert_message, NewMessageRecord};
use crate::database::{AsyncDbConnection, DbError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySummary {
    pub success_count: usize,
    pub failure_count: usize,
}

impl DeliverySummary {
    pub fn from_outcomes(outcomes: &[DispatchOutcome]) -> Self {
        let success_count = outcomes.iter().filter(|o| o.success).count();
        Self {
            success_count,
            failure_count: outcomes.len() - success_count,
        }
    }
}

/// Write the one history record for a finished batch.
///
/// Called once per dispatch, after every recipient has been attempted.
pub async fn record_dispatch(
    conn: AsyncDbConnection,
    body: &str,
    sender: Option<&str>,
    recipient_count: usize,
    outcomes: &[DispatchOutcome],
) -> Result<MessageRecord, DbError> {
    let summary = DeliverySummary::from_outcomes(outcomes);

    let record = insert_message(
        conn,
        &NewMessageRecord {
            content: body.to_string(),
            sent_by: sender
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_SENDER)
                .to_string(),
            recipient_count: recipient_count as i64,
            success_count: summary.success_count as i64,
            failure_count: summary.failure_count as i64,
        },
    )
    .await?;

    tracing::info!(
        "Logged message {}: {} sent, {} failed",
        record.id,
        record.success_count,
        record.failure_count
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::messages::list_messages;
    use crate::test_support::temp_database;

    fn outcomes() -> Vec<DispatchOutcome> {
        vec![
            DispatchOutcome::delivered("+1", "SM1"),
            DispatchOutcome::failed("+2", "unreachable"),
            DispatchOutcome::delivered("+3", "SM3"),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = DeliverySummary::from_outcomes(&outcomes());
        assert_eq!(
            summary,
            DeliverySummary {
                success_count: 2,
                failure_count: 1
            }
        );
        assert_eq!(
            DeliverySummary::from_outcomes(&[]),
            DeliverySummary {
                success_count: 0,
                failure_count: 0
            }
        );
    }

    #[tokio::test]
    async fn test_record_dispatch_persists_one_record() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let record = record_dispatch(
            conn.clone(),
            "Storm warning",
            Some("admin@example.com"),
            3,
            &outcomes(),
        )
        .await
        .unwrap();

        assert_eq!(record.content, "Storm warning");
        assert_eq!(record.sent_by, "admin@example.com");
        assert_eq!(record.recipient_count, 3);
        assert_eq!(record.success_count, 2);
        assert_eq!(record.failure_count, 1);

        let history = list_messages(conn).await.unwrap();
        assert_eq!(history, vec![record]);
    }

    #[tokio::test]
    async fn test_missing_sender_is_unknown() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let record = record_dispatch(conn.clone(), "hi", None, 3, &outcomes())
            .await
            .unwrap();
        assert_eq!(record.sent_by, "unknown");

        let record = record_dispatch(conn, "hi", Some(""), 3, &outcomes())
            .await
            .unwrap();
        assert_eq!(record.sent_by, "unknown");
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let first = record_dispatch(conn.clone(), "first", None, 3, &outcomes())
            .await
            .unwrap();
        let second = record_dispatch(conn.clone(), "second", None, 3, &outcomes())
            .await
            .unwrap();

        let history = list_messages(conn).await.unwrap();
        assert_eq!(
            history.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }
}
