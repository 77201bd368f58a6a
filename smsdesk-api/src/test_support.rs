//! Fixtures shared by the unit tests: a throwaway database, a scripted SMS
//! transport and an app factory wired like `main`.

use actix_web::cookie::Cookie;
use async_trait::async_trait;
use shared_types::{Contact, Recipient, SessionUser};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use crate::config::AdminConfig;
use crate::database::contacts::{insert_contact, NewContact};
use crate::database::Database;
use crate::dispatch::DispatchEngine;
use crate::helpers::sessions::{SessionStore, SESSION_COOKIE};
use crate::integrations::{SmsTransport, TransportError};

pub fn temp_database() -> (TempDir, Arc<Database>) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(&dir.path().join("test.sqlite3")).unwrap();
    (dir, Arc::new(db))
}

pub fn recipients(phones: &[&str]) -> Vec<Recipient> {
    phones
        .iter()
        .map(|phone| Recipient {
            phone_number: phone.to_string(),
            name: None,
        })
        .collect()
}

/// Records every send and fails the numbers it was told to.
#[derive(Default)]
pub struct ScriptedTransport {
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn failing_on(phones: &[&str]) -> Self {
        Self {
            failing: phones.iter().map(|p| p.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(to, _)| to.clone()).collect()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl SmsTransport for ScriptedTransport {
    async fn send(&self, to: &str, body: &str) -> Result<String, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));

        if self.failing.contains(to) {
            return Err(TransportError::Rejected {
                status: 400,
                message: format!("The 'To' number {} is not a valid phone number.", to),
            });
        }
        Ok(format!("SM-{}", to))
    }
}

/// Everything `test_app!` registers, kept alive for the length of a test.
pub struct TestState {
    _dir: TempDir,
    pub db: Arc<Database>,
    pub sessions: Arc<SessionStore>,
    pub engine: Arc<DispatchEngine>,
    pub transport: Arc<ScriptedTransport>,
    pub admin: AdminConfig,
}

impl TestState {
    pub fn new() -> Self {
        Self::build(ScriptedTransport::default(), fixed_admin())
    }

    /// Logins go through the stored admin account.
    pub fn without_fixed_admin() -> Self {
        Self::build(ScriptedTransport::default(), AdminConfig::default())
    }

    pub fn failing_on(phones: &[&str]) -> Self {
        Self::build(ScriptedTransport::failing_on(phones), fixed_admin())
    }

    fn build(transport: ScriptedTransport, admin: AdminConfig) -> Self {
        let (dir, db) = temp_database();
        let transport = Arc::new(transport);
        let engine = Arc::new(DispatchEngine::new(transport.clone(), Duration::ZERO));

        Self {
            _dir: dir,
            db,
            sessions: Arc::new(SessionStore::new(3600)),
            engine,
            transport,
            admin,
        }
    }

    /// A session cookie for the configured admin, minted without a login round trip.
    pub async fn login_cookie(&self) -> Cookie<'static> {
        let token = self
            .sessions
            .create(SessionUser {
                id: None,
                name: "Admin".to_string(),
                email: self.admin.email.clone(),
            })
            .await;
        Cookie::new(SESSION_COOKIE, token)
    }

    pub async fn add_contact(&self, name: &str, phone: &str, group: &str) -> Contact {
        insert_contact(
            self.db.async_connection.clone(),
            &NewContact {
                name: name.to_string(),
                phone_number: phone.to_string(),
                email: None,
                group: group.to_string(),
                user_id: None,
            },
        )
        .await
        .unwrap()
    }
}

fn fixed_admin() -> AdminConfig {
    AdminConfig {
        username: Some("admin".to_string()),
        password: Some("password".to_string()),
        name: None,
        email: Some("admin@example.com".to_string()),
    }
}

/// Build a test service with the same app data and routes as the server.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.db.clone()))
                .app_data(actix_web::web::Data::new($state.sessions.clone()))
                .app_data(actix_web::web::Data::new($state.engine.clone()))
                .app_data(actix_web::web::Data::new($state.admin.clone()))
                .configure(crate::configure_routes),
        )
        .await
    };
}

pub(crate) use test_app;
