//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting the admin routes.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::ErrorBody;
use crate::web::state::AppState;

/// The admin identity attached to a request once its session checks out.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
}

/// Pulls the session token out of a `Cookie` header value.
pub fn session_token(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|c| {
        let c = c.trim();
        c.strip_prefix("session=")
    })
}

fn unauthorized() -> Response {
    let body = ErrorBody {
        success: false,
        error: "Unauthorized".to_string(),
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// Middleware that validates the session cookie on every request.
///
/// If the token maps to a live session, the admin's identity is inserted into
/// request extensions for handlers to use. Otherwise the request is rejected
/// with 401 before any business logic runs. The session store is consulted
/// per request; nothing is cached across requests.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(unauthorized)?;

    let token = session_token(cookie_header).ok_or_else(unauthorized)?;

    let session = state.sessions.get(token).await.ok_or_else(unauthorized)?;

    req.extensions_mut().insert(AdminIdentity {
        username: session.username,
    });

    Ok(next.run(req).await)
}
