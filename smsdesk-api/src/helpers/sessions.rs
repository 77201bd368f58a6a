use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use shared_types::SessionUser;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const SESSION_COOKIE: &str = "smsdesk_session";

const TOKEN_LENGTH: usize = 48;

#[derive(Clone)]
struct SessionEntry {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

/// In-process session table keyed by the opaque cookie token.
///
/// Sessions do not survive a restart.
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    max_age: Duration,
}

fn new_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

impl SessionStore {
    pub fn new(max_age_secs: i64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_age: Duration::seconds(max_age_secs),
        }
    }

    pub fn max_age_secs(&self) -> i64 {
        self.max_age.num_seconds()
    }

    /// Start a session and return its token.
    pub async fn create(&self, user: SessionUser) -> String {
        let token = new_token();
        let entry = SessionEntry {
            user,
            expires_at: Utc::now() + self.max_age,
        };

        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, s| s.expires_at > Utc::now());
        sessions.insert(token.clone(), entry);
        token
    }

    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(entry) if entry.expires_at > Utc::now() => Some(entry.user.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    pub async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(token);
    }
}
