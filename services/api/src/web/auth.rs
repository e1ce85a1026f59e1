//! services/api/src/web/auth.rs
//!
//! Admin login and logout endpoints. Login verifies the password digest and
//! mints an opaque session token; logout drops the token's server-side state.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ErrorBody};
use crate::web::middleware::session_token;
use crate::web::state::AppState;
use crate::web::SuccessBody;
use clinic_core::auth::verify_password;
use clinic_core::ports::SessionData;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login - Authenticate an admin and establish a session
///
/// Unknown usernames and wrong passwords get the same generic failure.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SuccessBody),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let admin = state.store.find_admin_by_username(&req.username).await?;

    let valid = admin
        .as_ref()
        .is_some_and(|a| verify_password(&a.password_hash, &req.password));
    if !valid {
        let body = ErrorBody {
            success: false,
            error: "Identifiants incorrects".to_string(),
        };
        return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    }

    let token = Uuid::new_v4().to_string();
    state
        .sessions
        .set(
            &token,
            SessionData {
                username: req.username,
            },
        )
        .await;

    let cookie = format!("session={}; HttpOnly; SameSite=Lax; Path=/", token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SuccessBody { success: true }),
    )
        .into_response())
}

/// POST /logout - Clear the caller's session
///
/// Idempotent: a caller with no session still gets `{success: true}`.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logout successful", body = SuccessBody)
    )
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_token)
    {
        state.sessions.clear(token).await;
    }

    let cookie = "session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0";

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(SuccessBody { success: true }),
    )
}
