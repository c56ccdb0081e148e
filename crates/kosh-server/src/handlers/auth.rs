//! Authentication handlers: register, login, logout, current user

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{bearer_token, AppError, AppState, SuccessResponse};
use kosh_core::auth::{self, AuthContext};

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

/// POST /api/auth/register - Create an account (seeded with sample data)
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let username = auth::normalize_username(&req.username)?;

    if !auth::register(&state.db, &username, &req.password, &req.name)? {
        return Err(AppError::conflict("Username already exists"));
    }

    state
        .db
        .log_audit(&username, "register", Some("user"), None, None)?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { username })))
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub username: String,
    pub display_name: String,
    pub expires_in_hours: i64,
}

/// POST /api/auth/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let ttl = state.config.session_ttl;
    let (ctx, token) = auth::start_session(&state.db, &req.username, &req.password, ttl)?;

    state
        .db
        .log_audit(&ctx.username, "login", Some("session"), None, None)?;

    Ok(Json(LoginResponse {
        token,
        username: ctx.username,
        display_name: ctx.display_name,
        expires_in_hours: ttl.num_hours(),
    }))
}

/// POST /api/auth/logout - End the current session
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthContext>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    if let Some(token) = bearer_token(&headers) {
        state.db.delete_session(token)?;
    }
    state
        .db
        .log_audit(&user.username, "logout", Some("session"), None, None)?;
    info!(user = %user.username, "Logged out");

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/me - The currently authenticated user
pub async fn get_me(Extension(user): Extension<AuthContext>) -> Json<AuthContext> {
    Json(user)
}
