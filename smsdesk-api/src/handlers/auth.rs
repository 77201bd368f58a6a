use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, Result};
use futures::future::LocalBoxFuture;
use shared_types::{LoginRequest, LogoutResponse, SessionUser};
use std::sync::Arc;

use crate::config::AdminConfig;
use crate::database::users as users_db;
use crate::database::Database;
use crate::error::ApiError;
use crate::helpers::passwords::verify_password;
use crate::helpers::sessions::{SessionStore, SESSION_COOKIE};

/// The signed-in admin. Taking this as a handler argument is what makes a
/// route require authentication; extraction fails with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub user: SessionUser,
}

impl FromRequest for AdminSession {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let store = req.app_data::<web::Data<Arc<SessionStore>>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let Some(store) = store else {
                tracing::error!("Session store is not registered with the app");
                return Err(ApiError::Unauthenticated);
            };
            let token = token.ok_or(ApiError::Unauthenticated)?;

            match store.get(&token).await {
                Some(user) => Ok(AdminSession { token, user }),
                None => Err(ApiError::Unauthenticated),
            }
        })
    }
}

fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .finish()
}

/// Check credentials against the configured fixed admin when present,
/// otherwise against the stored admin account.
async fn authenticate(
    db: &Database,
    admin: &AdminConfig,
    username: &str,
    password: &str,
) -> std::result::Result<Option<SessionUser>, ApiError> {
    if let Some((admin_username, admin_password)) = admin.credentials() {
        if username == admin_username && password == admin_password {
            return Ok(Some(SessionUser {
                id: None,
                name: admin.name.clone().unwrap_or_else(|| "Admin".to_string()),
                email: admin.email.clone(),
            }));
        }
        return Ok(None);
    }

    let stored = users_db::find_by_username(db.async_connection.clone(), username)
        .await
        .map_err(|e| ApiError::internal("Failed to sign in", e))?;

    let Some(stored) = stored else {
        return Ok(None);
    };

    let valid = verify_password(password.to_string(), stored.password_hash)
        .await
        .map_err(|e| ApiError::internal("Failed to sign in", e))?;

    Ok(valid.then(|| SessionUser {
        id: Some(stored.user.id),
        name: stored.user.name,
        email: Some(stored.user.email),
    }))
}

pub async fn login(
    db: web::Data<Arc<Database>>,
    sessions: web::Data<Arc<SessionStore>>,
    admin: web::Data<AdminConfig>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let req = request.into_inner();

    let user = match authenticate(&db, &admin, &req.username, &req.password).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Rejected sign-in for {:?}", req.username);
            return Err(ApiError::InvalidCredentials.into());
        }
    };

    let token = sessions.create(user.clone()).await;
    tracing::info!("Admin {} signed in", user.name);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, sessions.max_age_secs()))
        .json(user))
}

pub async fn logout(
    req: HttpRequest,
    sessions: web::Data<Arc<SessionStore>>,
) -> Result<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        sessions.revoke(cookie.value()).await;
    }

    let mut expired = session_cookie(String::new(), 0);
    expired.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(expired)
        .json(LogoutResponse { success: true }))
}

pub async fn current_session(session: AdminSession) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(session.user))
}
