use rusqlite::{params, ErrorCode, OptionalExtension, Row};
use shared_types::AdminUser;

use crate::database::{AsyncDbConnection, DbError};

/// Stored admin account including its password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: AdminUser,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<AdminUser> {
    Ok(AdminUser {
        id: row.get(0)?,
        name: row.get(1)?,
        username: row.get(2)?,
        email: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Column named by a UNIQUE violation, e.g. `users.email` yields `email`.
fn unique_violation_column(e: &rusqlite::Error) -> Option<String> {
    match e {
        rusqlite::Error::SqliteFailure(err, Some(message))
            if err.code == ErrorCode::ConstraintViolation
                && message.starts_with("UNIQUE constraint failed") =>
        {
            message
                .rsplit('.')
                .next()
                .map(|column| column.trim().to_string())
        }
        _ => None,
    }
}

pub async fn count_users(conn: AsyncDbConnection) -> Result<i64, DbError> {
    let conn = conn.lock().await?;
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

/// Insert a user, reporting which unique column collided.
pub async fn insert_user(conn: AsyncDbConnection, user: &NewUser) -> Result<AdminUser, DbError> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    for (column, value) in [("username", &user.username), ("email", &user.email)] {
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM users WHERE {column} = ?1"),
            [value],
            |row| row.get(0),
        )?;

        if count > 0 {
            return Err(DbError::Duplicate(column.to_string()));
        }
    }

    // A concurrent insert can still win between the check and the write
    conn.query_row(
        "INSERT INTO users (name, username, email, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id, name, username, email, created_at",
        params![&user.name, &user.username, &user.email, &user.password_hash, now],
        user_from_row,
    )
    .map_err(|e| match unique_violation_column(&e) {
        Some(column) => DbError::Duplicate(column),
        None => e.into(),
    })
}

pub async fn find_by_username(
    conn: AsyncDbConnection,
    username: &str,
) -> Result<Option<UserCredentials>, DbError> {
    let conn = conn.lock().await?;

    let found = conn
        .query_row(
            "SELECT id, name, username, email, created_at, password_hash
             FROM users WHERE username = ?1",
            [username],
            |row| {
                Ok(UserCredentials {
                    user: user_from_row(row)?,
                    password_hash: row.get(5)?,
                })
            },
        )
        .optional()?;

    Ok(found)
}
