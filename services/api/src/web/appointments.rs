//! services/api/src/web/appointments.rs
//!
//! The public booking endpoint and the admin appointment views.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    Form,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;
use crate::web::SuccessBody;
use clinic_core::domain::{Appointment, AppointmentStatus, NewAppointment};
use clinic_core::ports::PortError;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The public booking form, as submitted by the marketing site.
#[derive(Deserialize, ToSchema)]
pub struct BookingForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub treatment_type: String,
    pub message: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
}

/// One appointment as returned to the admin UI.
#[derive(Serialize, ToSchema)]
pub struct AppointmentDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub treatment_type: String,
    pub message: String,
    pub appointment_date: NaiveDate,
    #[schema(value_type = String)]
    pub appointment_time: NaiveTime,
    #[schema(value_type = String)]
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            full_name: a.full_name,
            email: a.email,
            phone: a.phone,
            treatment_type: a.treatment_type,
            message: a.message,
            appointment_date: a.appointment_date,
            appointment_time: a.appointment_time,
            status: a.status,
            created_at: a.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct AppointmentListQuery {
    pub status: Option<AppointmentStatus>,
}

fn require_field(value: &str, name: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Port(PortError::Validation(format!(
            "{} is required",
            name
        ))));
    }
    Ok(())
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /prendre-rdv - Submit a booking from the public form
///
/// The appointment date and time are stamped from the server clock; whatever
/// the client sends for them is ignored. The record always starts `pending`.
#[utoipa::path(
    post,
    path = "/prendre-rdv",
    request_body(content = BookingForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Appointment recorded", body = BookingResponse),
        (status = 400, description = "A required field is missing"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn submit_appointment_handler(
    State(state): State<AppState>,
    Form(form): Form<BookingForm>,
) -> Result<Json<BookingResponse>, ApiError> {
    require_field(&form.full_name, "full_name")?;
    require_field(&form.email, "email")?;
    require_field(&form.phone, "phone")?;
    require_field(&form.treatment_type, "treatment_type")?;

    let now = Utc::now();
    state
        .store
        .create_appointment(NewAppointment {
            full_name: form.full_name,
            email: form.email,
            phone: form.phone,
            appointment_date: now.date_naive(),
            appointment_time: now.time(),
            treatment_type: form.treatment_type,
            message: form.message.unwrap_or_default(),
            status: AppointmentStatus::Pending,
        })
        .await?;

    Ok(Json(BookingResponse {
        success: true,
        message: "Rendez-vous enregistré avec succès".to_string(),
    }))
}

/// GET /appointments - List all appointments, newest first
#[utoipa::path(
    get,
    path = "/appointments",
    params(
        ("status" = Option<String>, Query, description = "Restrict to one status")
    ),
    responses(
        (status = 200, description = "All appointments", body = [AppointmentDto]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_appointments_handler(
    State(state): State<AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Vec<AppointmentDto>>, ApiError> {
    let appointments = state.store.list_appointments(query.status).await?;
    Ok(Json(
        appointments.into_iter().map(AppointmentDto::from).collect(),
    ))
}

/// POST /appointment/{id}/confirm - Mark an appointment confirmed
#[utoipa::path(
    post,
    path = "/appointment/{id}/confirm",
    params(("id" = i64, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Status updated", body = SuccessBody),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No appointment with this id")
    )
)]
pub async fn confirm_appointment_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessBody>, ApiError> {
    state
        .store
        .set_appointment_status(id, AppointmentStatus::Confirmed)
        .await?;
    Ok(Json(SuccessBody { success: true }))
}

/// POST /appointment/{id}/cancel - Mark an appointment cancelled
#[utoipa::path(
    post,
    path = "/appointment/{id}/cancel",
    params(("id" = i64, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Status updated", body = SuccessBody),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No appointment with this id")
    )
)]
pub async fn cancel_appointment_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessBody>, ApiError> {
    state
        .store
        .set_appointment_status(id, AppointmentStatus::Cancelled)
        .await?;
    Ok(Json(SuccessBody { success: true }))
}
