use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use super::ApiError;
use crate::auth::AuthUser;
use crate::auth::rate_limit::UNKNOWN_CLIENT;
use crate::db::RegisterError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Guard for protected routes: a well-formed `Authorization: Bearer <token>`
/// header must verify before any handler logic runs. On success the caller's
/// identity is injected into request extensions as [`AuthUser`].
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        bearer_token(&headers).ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    let claims = state
        .tokens()
        .verify(token)
        .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get("Authorization")?.to_str().ok()?;
    auth_header.strip_prefix("Bearer ").map(str::trim)
}

/// Fixed-window limiter on the login route, keyed by the client address.
/// Excess requests are rejected uniformly, before credentials are looked at.
pub async fn login_rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(UNKNOWN_CLIENT, |info| info.0.ip());

    if !state.login_limiter().check(addr).await {
        return Err(ApiError::RateLimited);
    }

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.first_name.is_empty()
        || payload.last_name.is_empty()
        || payload.email.is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::validation(
            "Name, email, and password are required",
        ));
    }

    let user = state
        .store()
        .create_user(
            &payload.first_name,
            &payload.last_name,
            &payload.email,
            &payload.password,
        )
        .await
        .map_err(|err| match err {
            RegisterError::DuplicateEmail => ApiError::validation("Email already registered"),
            RegisterError::Other(err) => ApiError::from(err),
        })?;

    tracing::info!(user_id = user.id, "registered new user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: user.email,
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password required"));
    }

    let user = state
        .store()
        .verify_credentials(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let token = state
        .tokens()
        .issue(user.id, "user")
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        role: "user".to_string(),
    }))
}
