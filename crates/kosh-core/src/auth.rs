//! Registration, login and password hashing
//!
//! Passwords are stored as Argon2id PHC strings with a per-user random salt.
//! Login failures always surface as [`Error::InvalidCredentials`], whether the
//! username is unknown or the password is wrong.

use std::sync::OnceLock;

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Duration;
use rand::rngs::OsRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{Error, Result};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 64;
pub const MIN_PASSWORD_LEN: usize = 6;

/// The authenticated caller of a user-scoped operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    pub username: String,
    pub display_name: String,
}

/// Hash a password into an Argon2id PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other.into()),
    }
}

/// Hash checked when the username doesn't exist, so that path costs the same
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("kosh-no-such-user").ok())
        .as_deref()
}

/// Trim and check a username
pub fn normalize_username(username: &str) -> Result<String> {
    let username = username.trim();
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(Error::InvalidData(format!(
            "Username must be {}-{} characters",
            MIN_USERNAME_LEN, MAX_USERNAME_LEN
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(Error::InvalidData(
            "Username cannot contain whitespace".to_string(),
        ));
    }
    Ok(username.to_string())
}

fn validate_registration(password: &str, name: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidData(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if name.trim().is_empty() {
        return Err(Error::InvalidData("Name cannot be empty".to_string()));
    }
    Ok(())
}

/// Register a new user and give them sample data
///
/// Returns `Ok(false)` when the username is already taken; the existing
/// account is left exactly as it was.
pub fn register(db: &Database, username: &str, password: &str, name: &str) -> Result<bool> {
    let username = normalize_username(username)?;
    validate_registration(password, name)?;

    if db.get_credentials(&username)?.is_some() {
        info!(%username, "Registration rejected: username taken");
        return Ok(false);
    }

    let hash = hash_password(password)?;
    if !db.create_user(&username, &hash, name.trim())? {
        info!(%username, "Registration rejected: username taken");
        return Ok(false);
    }

    db.seed_sample_data(&username, chrono::Local::now().date_naive())?;
    info!(%username, "User registered");
    Ok(true)
}

/// Verify credentials, returning the caller's context
pub fn login(db: &Database, username: &str, password: &str) -> Result<AuthContext> {
    let username = username.trim();

    let Some(creds) = db.get_credentials(username)? else {
        if let Some(dummy) = dummy_hash() {
            let _ = verify_password(password, dummy);
        }
        warn!(username, "Login failed");
        return Err(Error::InvalidCredentials);
    };

    if !verify_password(password, &creds.password_hash)? {
        warn!(username, "Login failed");
        return Err(Error::InvalidCredentials);
    }

    Ok(AuthContext {
        username: creds.username,
        display_name: creds.display_name,
    })
}

/// Log in and open a session, returning the context and its bearer token
///
/// Expired sessions are swept first.
pub fn start_session(
    db: &Database,
    username: &str,
    password: &str,
    ttl: Duration,
) -> Result<(AuthContext, String)> {
    let ctx = login(db, username, password)?;
    db.purge_expired_sessions()?;
    let token = db.create_session(&ctx.username, ttl)?;
    info!(username = %ctx.username, "Session started");
    Ok((ctx, token))
}
