//! services/api/src/web/dashboard.rs
//!
//! The admin dashboard aggregate: summary counts, recent records and the
//! trailing-six-month booking histogram, composed from store reads.

use axum::{extract::State, response::Json, Extension};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::appointments::AppointmentDto;
use crate::web::middleware::AdminIdentity;
use crate::web::gallery::GalleryItemDto;
use crate::web::state::AppState;
use clinic_core::domain::AppointmentStatus;

const RECENT_APPOINTMENTS: i64 = 10;
const RECENT_GALLERY_ITEMS: i64 = 6;
const HISTOGRAM_MONTHS: i64 = 6;

//=========================================================================================
// API Response Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_appointments: i64,
    pub today_appointments: i64,
    pub pending_appointments: i64,
    pub total_cases: i64,
}

#[derive(Serialize, ToSchema)]
pub struct MonthlyCountDto {
    /// Year-month in `YYYY-MM` form.
    pub month: String,
    pub count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardCharts {
    pub appointments_by_month: Vec<MonthlyCountDto>,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub appointments: Vec<AppointmentDto>,
    pub gallery: Vec<GalleryItemDto>,
    pub charts: DashboardCharts,
}

//=========================================================================================
// Handler
//=========================================================================================

/// GET /dashboard - Aggregate view for the admin landing page
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard aggregate", body = DashboardResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
) -> Result<Json<DashboardResponse>, ApiError> {
    debug!("dashboard requested by {}", admin.username);
    let store = &state.store;

    let stats = DashboardStats {
        total_appointments: store.count_appointments().await?,
        today_appointments: store.count_appointments_today().await?,
        pending_appointments: store
            .count_appointments_with_status(AppointmentStatus::Pending)
            .await?,
        total_cases: store.count_gallery_items().await?,
    };

    let appointments = store
        .recent_appointments(RECENT_APPOINTMENTS)
        .await?
        .into_iter()
        .map(AppointmentDto::from)
        .collect();

    let gallery = store
        .recent_gallery_items(RECENT_GALLERY_ITEMS)
        .await?
        .into_iter()
        .map(GalleryItemDto::from)
        .collect();

    let appointments_by_month = store
        .appointments_by_month(HISTOGRAM_MONTHS)
        .await?
        .into_iter()
        .map(|m| MonthlyCountDto {
            month: m.month,
            count: m.count,
        })
        .collect();

    Ok(Json(DashboardResponse {
        stats,
        appointments,
        gallery,
        charts: DashboardCharts {
            appointments_by_month,
        },
    }))
}
