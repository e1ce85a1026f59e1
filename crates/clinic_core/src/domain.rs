//! crates/clinic_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format,
//! except for `AppointmentStatus`, which carries its wire spelling.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// An administrator account. Seeded once at first startup; no exposed
/// operation ever mutates or deletes it.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    /// Unsalted SHA-256 hex digest of the password (see `crate::auth`).
    pub password_hash: String,
    pub email: Option<String>,
}

/// A before/after case shown in the clinic gallery.
#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub before_image: String,
    pub after_image: String,
    pub category: String,
    pub treatment_duration: String,
    /// Stored but not consulted by any filter.
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

/// The lifecycle state of an appointment. Only these three values are ever
/// written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("'{}' is not a valid appointment status", other)),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking submitted through the public form or created by seed data.
///
/// `created_at` is assigned by the store at insertion and is distinct from
/// `appointment_date`/`appointment_time`, which public submissions have
/// stamped from the server clock regardless of client input.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub treatment_type: String,
    pub message: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// The fields a caller supplies when creating an appointment. The store fills
/// in the identifier, the `pending` status and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub treatment_type: String,
    pub message: String,
    pub status: AppointmentStatus,
}

/// The fields a caller supplies when creating a gallery item. Only the title
/// is required; the web layer defaults the rest.
#[derive(Debug, Clone)]
pub struct NewGalleryItem {
    pub title: String,
    pub description: String,
    pub before_image: String,
    pub after_image: String,
    pub category: String,
    pub treatment_duration: String,
}

/// One bucket of the dashboard's trailing-six-month histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    /// Year-month in `YYYY-MM` form.
    pub month: String,
    pub count: i64,
}
