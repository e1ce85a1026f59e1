//! services/api/src/web/mod.rs
//!
//! Handler modules, router assembly and the OpenAPI master definition.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod gallery;
pub mod middleware;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub use middleware::require_admin;
pub use state::AppState;

/// Mirrors the original site's upload cap.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// The minimal `{success: true}` acknowledgement most admin actions return.
#[derive(Serialize, ToSchema)]
pub struct SuccessBody {
    pub success: bool,
}

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        appointments::submit_appointment_handler,
        appointments::list_appointments_handler,
        appointments::confirm_appointment_handler,
        appointments::cancel_appointment_handler,
        auth::login_handler,
        auth::logout_handler,
        dashboard::dashboard_handler,
        gallery::list_gallery_handler,
        gallery::create_gallery_handler,
        gallery::delete_gallery_handler,
    ),
    components(schemas(
        SuccessBody,
        appointments::BookingForm,
        appointments::BookingResponse,
        appointments::AppointmentDto,
        auth::LoginRequest,
        dashboard::DashboardResponse,
        dashboard::DashboardStats,
        dashboard::DashboardCharts,
        dashboard::MonthlyCountDto,
        gallery::GalleryItemDto,
        gallery::CreateGalleryRequest,
    )),
    tags(
        (name = "Clinic API", description = "Public booking form and admin dashboard endpoints. Admin paths are nested under the configured admin segment.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router Assembly
//=========================================================================================

/// Builds the application router: the public booking route, and the admin API
/// nested under the configured admin path with the session guard layered onto
/// every gated route at registration time.
pub fn build_router(app_state: AppState) -> Router {
    // Admin routes reachable without a session.
    let admin_open = Router::new()
        .route("/login", post(auth::login_handler))
        .route("/logout", post(auth::logout_handler));

    // Every route registered here sits behind the session guard.
    let admin_gated = Router::new()
        .route("/dashboard", get(dashboard::dashboard_handler))
        .route("/appointments", get(appointments::list_appointments_handler))
        .route(
            "/appointment/{id}/confirm",
            post(appointments::confirm_appointment_handler),
        )
        .route(
            "/appointment/{id}/cancel",
            post(appointments::cancel_appointment_handler),
        )
        .route(
            "/gallery",
            get(gallery::list_gallery_handler).post(gallery::create_gallery_handler),
        )
        .route("/gallery/{id}", delete(gallery::delete_gallery_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_admin,
        ));

    let admin_router = admin_open.merge(admin_gated);

    Router::new()
        .route(
            "/prendre-rdv",
            post(appointments::submit_appointment_handler),
        )
        .nest(&format!("/{}", app_state.config.admin_path), admin_router)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

//=========================================================================================
// Tests (composed-router behavior)
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemorySessionStore, SeedAdmin, SqliteStore};
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;

    const ADMIN: &str = "admin-secret-1234abcd";

    fn test_config() -> Config {
        Config {
            bind_address: "127.0.0.1:0".parse().expect("addr"),
            database_url: "sqlite::memory:".to_string(),
            log_level: tracing::Level::INFO,
            admin_path: ADMIN.to_string(),
            allowed_origin: "http://localhost:5000".to_string(),
            default_admin_username: "admin".to_string(),
            default_admin_password: "Admin@2024".to_string(),
            default_admin_email: "admin@savassmile.com".to_string(),
        }
    }

    async fn test_router() -> Router {
        let config = test_config();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let store = SqliteStore::new(
            pool,
            SeedAdmin {
                username: config.default_admin_username.clone(),
                password: config.default_admin_password.clone(),
                email: config.default_admin_email.clone(),
            },
        );
        clinic_core::ports::ClinicStore::initialize(&store)
            .await
            .expect("initialize");

        build_router(AppState {
            store: Arc::new(store),
            sessions: Arc::new(MemorySessionStore::new()),
            config: Arc::new(config),
        })
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    /// Logs in with the seed credentials and returns the session cookie.
    async fn login(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(
                Request::post(format!("/{}/login", ADMIN))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"username": "admin", "password": "Admin@2024"}"#,
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .expect("ascii cookie");
        cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }

    #[tokio::test]
    async fn gated_routes_reject_unauthenticated_callers() {
        let router = test_router().await;
        for (method, path) in [
            ("GET", format!("/{}/dashboard", ADMIN)),
            ("GET", format!("/{}/appointments", ADMIN)),
            ("POST", format!("/{}/appointment/1/confirm", ADMIN)),
            ("GET", format!("/{}/gallery", ADMIN)),
            ("DELETE", format!("/{}/gallery/1", ADMIN)),
        ] {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(&path)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "{} {} should be gated",
                method,
                path
            );
        }
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_with_a_generic_error() {
        let router = test_router().await;
        let response = router
            .oneshot(
                Request::post(format!("/{}/login", ADMIN))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"username": "admin", "password": "nope"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Identifiants incorrects");
    }

    #[tokio::test]
    async fn seed_credentials_open_the_dashboard() {
        let router = test_router().await;
        let cookie = login(&router).await;

        let response = router
            .oneshot(
                Request::get(format!("/{}/dashboard", ADMIN))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["stats"]["total_appointments"], 3);
        assert_eq!(body["stats"]["pending_appointments"], 1);
        assert_eq!(body["stats"]["total_cases"], 3);
        assert_eq!(body["appointments"].as_array().expect("array").len(), 3);
        assert_eq!(body["gallery"].as_array().expect("array").len(), 3);
        assert_eq!(
            body["charts"]["appointments_by_month"]
                .as_array()
                .expect("array")
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn public_booking_needs_no_session_and_starts_pending() {
        let router = test_router().await;
        let response = router
            .clone()
            .oneshot(
                Request::post("/prendre-rdv")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from(
                        "full_name=Julie%20Robert&email=julie@email.com&phone=0699887766&treatment_type=invisalign",
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);

        let cookie = login(&router).await;
        let response = router
            .oneshot(
                Request::get(format!("/{}/appointments?status=pending", ADMIN))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let body = json_body(response).await;
        let pending = body.as_array().expect("array");
        assert!(pending
            .iter()
            .any(|a| a["full_name"] == "Julie Robert" && a["status"] == "pending"));
    }

    #[tokio::test]
    async fn booking_without_a_phone_is_a_structured_validation_error() {
        let router = test_router().await;
        let response = router
            .oneshot(
                Request::post("/prendre-rdv")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from(
                        "full_name=Julie&email=julie@email.com&treatment_type=invisalign",
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "phone is required");
    }

    #[tokio::test]
    async fn logout_invalidates_the_session_and_is_idempotent() {
        let router = test_router().await;
        let cookie = login(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::post(format!("/{}/logout", ADMIN))
                    .header(header::COOKIE, cookie.clone())
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        // The token no longer opens gated routes.
        let response = router
            .clone()
            .oneshot(
                Request::get(format!("/{}/appointments", ADMIN))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Logging out with no session at all still succeeds.
        let response = router
            .oneshot(
                Request::post(format!("/{}/logout", ADMIN))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn confirming_an_unknown_appointment_is_404() {
        let router = test_router().await;
        let cookie = login(&router).await;

        let response = router
            .oneshot(
                Request::post(format!("/{}/appointment/9999/confirm", ADMIN))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn title_only_gallery_create_fills_the_defaults() {
        let router = test_router().await;
        let cookie = login(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::post(format!("/{}/gallery", ADMIN))
                    .header(header::COOKIE, cookie.clone())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"title": "Nouvelle transformation"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::get(format!("/{}/gallery", ADMIN))
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let body = json_body(response).await;
        let newest = &body.as_array().expect("array")[0];
        assert_eq!(newest["title"], "Nouvelle transformation");
        assert_eq!(newest["category"], "Invisalign");
        assert_eq!(newest["description"], "");
        assert_eq!(newest["before_image"], "");
        assert_eq!(newest["visible"], true);
    }
}
