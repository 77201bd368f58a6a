use actix_web::{web, HttpResponse, Result};
use std::sync::Arc;

use crate::database::messages as messages_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::handlers::AdminSession;

pub async fn list_messages(
    _session: AdminSession,
    db: web::Data<Arc<Database>>,
) -> Result<HttpResponse> {
    let messages = messages_db::list_messages(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch messages", e))?;

    Ok(HttpResponse::Ok().json(messages))
}

#[cfg(test)]
mod tests {
    use crate::dispatch::record_dispatch;
    use crate::test_support::{test_app, TestState};
    use actix_web::{http::StatusCode, test};
    use shared_types::{DispatchOutcome, MessageRecord};

    #[actix_web::test]
    async fn test_history_is_newest_first() {
        let state = TestState::new();
        let app = test_app!(state);
        let cookie = state.login_cookie().await;

        for body in ["first", "second"] {
            record_dispatch(
                state.db.async_connection.clone(),
                body,
                Some("admin@example.com"),
                1,
                &[DispatchOutcome::delivered("+1", "SM1")],
            )
            .await
            .unwrap();
        }

        let req = test::TestRequest::get()
            .uri("/api/messages")
            .cookie(cookie)
            .to_request();
        let records: Vec<MessageRecord> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            records.iter().map(|r| r.content.as_str()).collect::<Vec<_>>(),
            vec!["second", "first"]
        );

        let req = test::TestRequest::get().uri("/api/messages").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
