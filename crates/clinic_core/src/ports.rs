//! crates/clinic_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the
//! SQLite store or the in-memory session map.

use async_trait::async_trait;

use crate::domain::{
    AdminUser, Appointment, AppointmentStatus, GalleryItem, MonthlyCount, NewAppointment,
    NewGalleryItem,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Port
//=========================================================================================

/// The persistence contract for the three clinic collections.
///
/// Each method is a single short-lived statement (or a small read-then-write
/// sequence); no call spans entities transactionally.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    // --- Schema & seed lifecycle ---

    /// Idempotently creates the three tables and, for each collection that is
    /// empty, inserts its seed rows. Repeated calls never duplicate seeds.
    async fn initialize(&self) -> PortResult<()>;

    // --- Admin users ---

    async fn find_admin_by_username(&self, username: &str) -> PortResult<Option<AdminUser>>;

    // --- Appointments ---

    /// Inserts an appointment and returns it with the store-assigned id and
    /// `created_at`.
    async fn create_appointment(&self, new: NewAppointment) -> PortResult<Appointment>;

    /// All appointments, most recently created first, optionally restricted
    /// to one status.
    async fn list_appointments(
        &self,
        status: Option<AppointmentStatus>,
    ) -> PortResult<Vec<Appointment>>;

    /// Updates exactly one record's status; `NotFound` when no row matches.
    /// Idempotent when the record already has the target status.
    async fn set_appointment_status(&self, id: i64, status: AppointmentStatus) -> PortResult<()>;

    async fn count_appointments(&self) -> PortResult<i64>;

    /// Appointments whose `created_at` falls on the server's current
    /// calendar day.
    async fn count_appointments_today(&self) -> PortResult<i64>;

    async fn count_appointments_with_status(&self, status: AppointmentStatus) -> PortResult<i64>;

    async fn recent_appointments(&self, limit: i64) -> PortResult<Vec<Appointment>>;

    /// Per-month appointment counts over the trailing `months` months,
    /// grouped by creation year-month, ascending. Months with no
    /// appointments are absent from the result.
    async fn appointments_by_month(&self, months: i64) -> PortResult<Vec<MonthlyCount>>;

    // --- Gallery ---

    async fn create_gallery_item(&self, new: NewGalleryItem) -> PortResult<GalleryItem>;

    async fn list_gallery_items(&self) -> PortResult<Vec<GalleryItem>>;

    async fn recent_gallery_items(&self, limit: i64) -> PortResult<Vec<GalleryItem>>;

    /// Removes one record; `NotFound` when the id does not exist.
    async fn delete_gallery_item(&self, id: i64) -> PortResult<()>;

    async fn count_gallery_items(&self) -> PortResult<i64>;
}

//=========================================================================================
// Session Port
//=========================================================================================

/// The authenticated state held for one logged-in admin client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub username: String,
}

/// Server-side session state keyed by the opaque cookie-carried token.
///
/// Implementations may be backed by memory, a cache, or a distributed store;
/// the business logic only ever sees this interface.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, token: &str) -> Option<SessionData>;
    async fn set(&self, token: &str, data: SessionData);
    /// Removes the token's entry; safe to call for an unknown token.
    async fn clear(&self, token: &str);
}
