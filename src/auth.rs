//! User accounts gating access to the analysis form.
//!
//! A minimal precondition check for the presentation layer; nothing in
//! the computation pipeline depends on it.

use bcrypt::DEFAULT_COST;
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors that can occur during account handling.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Creates the users table if it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Registers a new user with a bcrypt-hashed password.
pub async fn register(pool: &SqlitePool, username: &str, password: &str) -> Result<(), AuthError> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Err(AuthError::UsernameTaken(username.to_string()));
    }

    let hash = bcrypt::hash(password, DEFAULT_COST)?;
    sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
        .bind(username)
        .bind(&hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Checks a username/password pair against the stored hash.
///
/// Unknown usernames and wrong passwords both return `false`; only
/// infrastructure failures are errors.
pub async fn verify(pool: &SqlitePool, username: &str, password: &str) -> Result<bool, AuthError> {
    let hash = sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match hash {
        Some(hash) => Ok(bcrypt::verify(password, &hash)?),
        None => Ok(false),
    }
}
