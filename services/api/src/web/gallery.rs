//! services/api/src/web/gallery.rs
//!
//! Admin management of the before/after gallery.

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;
use crate::web::SuccessBody;
use clinic_core::domain::{GalleryItem, NewGalleryItem};
use clinic_core::ports::PortError;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// One gallery case as returned to the admin UI.
#[derive(Serialize, ToSchema)]
pub struct GalleryItemDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub before_image: String,
    pub after_image: String,
    pub category: String,
    pub treatment_duration: String,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

impl From<GalleryItem> for GalleryItemDto {
    fn from(item: GalleryItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            before_image: item.before_image,
            after_image: item.after_image,
            category: item.category,
            treatment_duration: item.treatment_duration,
            visible: item.visible,
            created_at: item.created_at,
        }
    }
}

/// Only the title is required; the rest default to empty strings and the
/// category to `Invisalign`.
#[derive(Deserialize, ToSchema)]
pub struct CreateGalleryRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub before_image: Option<String>,
    pub after_image: Option<String>,
    pub category: Option<String>,
    pub treatment_duration: Option<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /gallery - List all gallery items, newest first
#[utoipa::path(
    get,
    path = "/gallery",
    responses(
        (status = 200, description = "All gallery items", body = [GalleryItemDto]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_gallery_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItemDto>>, ApiError> {
    let items = state.store.list_gallery_items().await?;
    Ok(Json(items.into_iter().map(GalleryItemDto::from).collect()))
}

/// POST /gallery - Create a gallery item
#[utoipa::path(
    post,
    path = "/gallery",
    request_body = CreateGalleryRequest,
    responses(
        (status = 200, description = "Item created", body = SuccessBody),
        (status = 400, description = "Title missing"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_gallery_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateGalleryRequest>,
) -> Result<Json<SuccessBody>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Port(PortError::Validation(
            "title is required".to_string(),
        )));
    }

    state
        .store
        .create_gallery_item(NewGalleryItem {
            title: req.title,
            description: req.description.unwrap_or_default(),
            before_image: req.before_image.unwrap_or_default(),
            after_image: req.after_image.unwrap_or_default(),
            category: req.category.unwrap_or_else(|| "Invisalign".to_string()),
            treatment_duration: req.treatment_duration.unwrap_or_default(),
        })
        .await?;

    Ok(Json(SuccessBody { success: true }))
}

/// DELETE /gallery/{id} - Remove a gallery item
#[utoipa::path(
    delete,
    path = "/gallery/{id}",
    params(("id" = i64, Path, description = "Gallery item identifier")),
    responses(
        (status = 200, description = "Item removed", body = SuccessBody),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No item with this id")
    )
)]
pub async fn delete_gallery_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessBody>, ApiError> {
    state.store.delete_gallery_item(id).await?;
    Ok(Json(SuccessBody { success: true }))
}
