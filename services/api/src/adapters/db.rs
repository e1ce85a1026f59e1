//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ClinicStore` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;
use std::str::FromStr;

use clinic_core::auth::hash_password;
use clinic_core::domain::{
    AdminUser, Appointment, AppointmentStatus, GalleryItem, MonthlyCount, NewAppointment,
    NewGalleryItem,
};
use clinic_core::ports::{ClinicStore, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// The admin account inserted when the `admin_users` table is empty.
#[derive(Clone, Debug)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// A database adapter that implements the `ClinicStore` port.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    seed_admin: SeedAdmin,
}

impl SqliteStore {
    /// Creates a new `SqliteStore`.
    pub fn new(pool: SqlitePool, seed_admin: SeedAdmin) -> Self {
        Self { pool, seed_admin }
    }

    async fn fetch_appointment(&self, id: i64) -> PortResult<Appointment> {
        let record = sqlx::query_as::<_, AppointmentRecord>(
            "SELECT id, full_name, email, phone, appointment_date, appointment_time, \
             treatment_type, message, status, created_at FROM appointments WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("Appointment {} not found", id))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;
        record.to_domain()
    }

    async fn fetch_gallery_item(&self, id: i64) -> PortResult<GalleryItem> {
        let record = sqlx::query_as::<_, GalleryRecord>(
            "SELECT id, title, description, before_image, after_image, category, \
             treatment_duration, visible, created_at FROM gallery WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("Gallery item {} not found", id))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct AdminUserRecord {
    id: i64,
    username: String,
    password_hash: String,
    email: Option<String>,
}
impl AdminUserRecord {
    fn to_domain(self) -> AdminUser {
        AdminUser {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            email: self.email,
        }
    }
}

#[derive(FromRow)]
struct GalleryRecord {
    id: i64,
    title: String,
    description: String,
    before_image: String,
    after_image: String,
    category: String,
    treatment_duration: String,
    visible: bool,
    created_at: DateTime<Utc>,
}
impl GalleryRecord {
    fn to_domain(self) -> GalleryItem {
        GalleryItem {
            id: self.id,
            title: self.title,
            description: self.description,
            before_image: self.before_image,
            after_image: self.after_image,
            category: self.category,
            treatment_duration: self.treatment_duration,
            visible: self.visible,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct AppointmentRecord {
    id: i64,
    full_name: String,
    email: String,
    phone: String,
    appointment_date: NaiveDate,
    appointment_time: NaiveTime,
    treatment_type: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
}
impl AppointmentRecord {
    fn to_domain(self) -> PortResult<Appointment> {
        let status = AppointmentStatus::from_str(&self.status)
            .map_err(PortError::Unexpected)?;
        Ok(Appointment {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            treatment_type: self.treatment_type,
            message: self.message,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(FromRow)]
struct MonthRecord {
    month: String,
    count: i64,
}

//=========================================================================================
// Schema & Seed Data
//=========================================================================================

const CREATE_ADMIN_USERS: &str = "\
CREATE TABLE IF NOT EXISTS admin_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    email TEXT
)";

const CREATE_GALLERY: &str = "\
CREATE TABLE IF NOT EXISTS gallery (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    before_image TEXT NOT NULL DEFAULT '',
    after_image TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT 'Invisalign',
    treatment_duration TEXT NOT NULL DEFAULT '',
    visible INTEGER NOT NULL DEFAULT 1,
    created_at TIMESTAMP NOT NULL
)";

const CREATE_APPOINTMENTS: &str = "\
CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    appointment_date DATE NOT NULL,
    appointment_time TIME NOT NULL,
    treatment_type TEXT NOT NULL,
    message TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TIMESTAMP NOT NULL
)";

/// Sample gallery cases inserted when the table is empty.
const SEED_GALLERY: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Sourire parfait en 6 mois",
        "Traitement Invisalign complet",
        "https://images.unsplash.com/photo-1588776814546-1ffcf47267a5?w=600",
        "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=600",
        "Invisalign",
        "6 mois",
    ),
    (
        "Blanchiment professionnel",
        "Résultats immédiats et durables",
        "https://images.unsplash.com/photo-1544006659-f0b21884ce1d?w=600",
        "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=600",
        "Blanchiment",
        "1 séance",
    ),
    (
        "Alignement rapide",
        "Correction en seulement 4 mois",
        "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=600",
        "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=600",
        "Invisalign",
        "4 mois",
    ),
];

/// Sample appointments inserted when the table is empty. Dates and times are
/// bound as text; the status column holds the wire spelling.
const SEED_APPOINTMENTS: &[(&str, &str, &str, &str, &str, &str, &str, &str)] = &[
    (
        "Sophie Martin",
        "sophie@email.com",
        "0612345678",
        "invisalign",
        "Première consultation",
        "2024-01-15",
        "14:30:00",
        "confirmed",
    ),
    (
        "Thomas Bernard",
        "thomas@email.com",
        "0623456789",
        "blanchiment",
        "Intéressé par le blanchiment",
        "2024-01-16",
        "10:00:00",
        "pending",
    ),
    (
        "Marie Dubois",
        "marie@email.com",
        "0634567890",
        "consultation",
        "Renseignements généraux",
        "2024-01-17",
        "16:45:00",
        "confirmed",
    ),
];

//=========================================================================================
// `ClinicStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ClinicStore for SqliteStore {
    async fn initialize(&self) -> PortResult<()> {
        for statement in [CREATE_ADMIN_USERS, CREATE_GALLERY, CREATE_APPOINTMENTS] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }

        let admin_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if admin_count == 0 {
            sqlx::query("INSERT INTO admin_users (username, password_hash, email) VALUES (?, ?, ?)")
                .bind(&self.seed_admin.username)
                .bind(hash_password(&self.seed_admin.password))
                .bind(&self.seed_admin.email)
                .execute(&self.pool)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }

        let gallery_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gallery")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if gallery_count == 0 {
            for (title, description, before, after, category, duration) in SEED_GALLERY {
                sqlx::query(
                    "INSERT INTO gallery (title, description, before_image, after_image, \
                     category, treatment_duration, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(title)
                .bind(description)
                .bind(before)
                .bind(after)
                .bind(category)
                .bind(duration)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
            }
        }

        let appointment_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if appointment_count == 0 {
            for (name, email, phone, treatment, message, date, time, status) in SEED_APPOINTMENTS {
                sqlx::query(
                    "INSERT INTO appointments (full_name, email, phone, treatment_type, \
                     message, appointment_date, appointment_time, status, created_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(name)
                .bind(email)
                .bind(phone)
                .bind(treatment)
                .bind(message)
                .bind(date)
                .bind(time)
                .bind(status)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
            }
        }

        Ok(())
    }

    async fn find_admin_by_username(&self, username: &str) -> PortResult<Option<AdminUser>> {
        let record = sqlx::query_as::<_, AdminUserRecord>(
            "SELECT id, username, password_hash, email FROM admin_users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(AdminUserRecord::to_domain))
    }

    async fn create_appointment(&self, new: NewAppointment) -> PortResult<Appointment> {
        let result = sqlx::query(
            "INSERT INTO appointments (full_name, email, phone, treatment_type, message, \
             appointment_date, appointment_time, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.treatment_type)
        .bind(&new.message)
        .bind(new.appointment_date)
        .bind(new.appointment_time)
        .bind(new.status.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        self.fetch_appointment(result.last_insert_rowid()).await
    }

    async fn list_appointments(
        &self,
        status: Option<AppointmentStatus>,
    ) -> PortResult<Vec<Appointment>> {
        let records = match status {
            Some(status) => {
                sqlx::query_as::<_, AppointmentRecord>(
                    "SELECT id, full_name, email, phone, appointment_date, appointment_time, \
                     treatment_type, message, status, created_at FROM appointments \
                     WHERE status = ? ORDER BY created_at DESC, id DESC",
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, AppointmentRecord>(
                    "SELECT id, full_name, email, phone, appointment_date, appointment_time, \
                     treatment_type, message, status, created_at FROM appointments \
                     ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn set_appointment_status(&self, id: i64, status: AppointmentStatus) -> PortResult<()> {
        let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Appointment {} not found",
                id
            )));
        }
        Ok(())
    }

    async fn count_appointments(&self) -> PortResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn count_appointments_today(&self) -> PortResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM appointments WHERE date(created_at) = date('now')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn count_appointments_with_status(&self, status: AppointmentStatus) -> PortResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn recent_appointments(&self, limit: i64) -> PortResult<Vec<Appointment>> {
        let records = sqlx::query_as::<_, AppointmentRecord>(
            "SELECT id, full_name, email, phone, appointment_date, appointment_time, \
             treatment_type, message, status, created_at FROM appointments \
             ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn appointments_by_month(&self, months: i64) -> PortResult<Vec<MonthlyCount>> {
        let records = sqlx::query_as::<_, MonthRecord>(
            "SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS count \
             FROM appointments \
             WHERE created_at >= date('now', '-' || ? || ' months') \
             GROUP BY strftime('%Y-%m', created_at) \
             ORDER BY month",
        )
        .bind(months)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records
            .into_iter()
            .map(|r| MonthlyCount {
                month: r.month,
                count: r.count,
            })
            .collect())
    }

    async fn create_gallery_item(&self, new: NewGalleryItem) -> PortResult<GalleryItem> {
        let result = sqlx::query(
            "INSERT INTO gallery (title, description, before_image, after_image, category, \
             treatment_duration, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.before_image)
        .bind(&new.after_image)
        .bind(&new.category)
        .bind(&new.treatment_duration)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        self.fetch_gallery_item(result.last_insert_rowid()).await
    }

    async fn list_gallery_items(&self) -> PortResult<Vec<GalleryItem>> {
        let records = sqlx::query_as::<_, GalleryRecord>(
            "SELECT id, title, description, before_image, after_image, category, \
             treatment_duration, visible, created_at FROM gallery \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(GalleryRecord::to_domain).collect())
    }

    async fn recent_gallery_items(&self, limit: i64) -> PortResult<Vec<GalleryItem>> {
        let records = sqlx::query_as::<_, GalleryRecord>(
            "SELECT id, title, description, before_image, after_image, category, \
             treatment_duration, visible, created_at FROM gallery \
             ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(GalleryRecord::to_domain).collect())
    }

    async fn delete_gallery_item(&self, id: i64) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Gallery item {} not found",
                id
            )));
        }
        Ok(())
    }

    async fn count_gallery_items(&self) -> PortResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM gallery")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::auth::verify_password;
    use sqlx::sqlite::SqlitePoolOptions;

    fn seed_admin() -> SeedAdmin {
        SeedAdmin {
            username: "admin".to_string(),
            password: "Admin@2024".to_string(),
            email: "admin@savassmile.com".to_string(),
        }
    }

    /// A single-connection pool so every query sees the same in-memory
    /// database.
    async fn memory_store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let store = SqliteStore::new(pool, seed_admin());
        store.initialize().await.expect("initialize");
        store
    }

    fn booking(name: &str) -> NewAppointment {
        let now = Utc::now();
        NewAppointment {
            full_name: name.to_string(),
            email: format!("{}@email.com", name.to_lowercase().replace(' ', ".")),
            phone: "0600000000".to_string(),
            appointment_date: now.date_naive(),
            appointment_time: now.time(),
            treatment_type: "consultation".to_string(),
            message: String::new(),
            status: AppointmentStatus::Pending,
        }
    }

    #[tokio::test]
    async fn initialize_is_idempotent_and_never_reseeds() {
        let store = memory_store().await;
        store.initialize().await.expect("second initialize");
        store.initialize().await.expect("third initialize");

        assert_eq!(store.count_appointments().await.unwrap(), 3);
        assert_eq!(store.count_gallery_items().await.unwrap(), 3);
        let admin = store
            .find_admin_by_username("admin")
            .await
            .unwrap()
            .expect("seed admin present");
        assert!(verify_password(&admin.password_hash, "Admin@2024"));
        assert_eq!(admin.email.as_deref(), Some("admin@savassmile.com"));
    }

    #[tokio::test]
    async fn unknown_admin_lookup_returns_none() {
        let store = memory_store().await;
        assert!(store
            .find_admin_by_username("root")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn created_appointment_gets_store_assigned_id_and_timestamp() {
        let store = memory_store().await;
        let before = Utc::now();
        let created = store.create_appointment(booking("Paul Durant")).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.status, AppointmentStatus::Pending);
        assert!(created.created_at >= before);
        assert_eq!(store.count_appointments().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filterable() {
        let store = memory_store().await;
        let created = store.create_appointment(booking("Nadia Rahmani")).await.unwrap();

        let all = store.list_appointments(None).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, created.id);

        let pending = store
            .list_appointments(Some(AppointmentStatus::Pending))
            .await
            .unwrap();
        assert!(pending.iter().all(|a| a.status == AppointmentStatus::Pending));
        assert_eq!(pending.len(), 2);
    }

    #[tokio::test]
    async fn set_status_is_idempotent() {
        let store = memory_store().await;
        let created = store.create_appointment(booking("Leo Petit")).await.unwrap();

        store
            .set_appointment_status(created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        store
            .set_appointment_status(created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();

        let confirmed = store
            .list_appointments(Some(AppointmentStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(
            confirmed.iter().filter(|a| a.id == created.id).count(),
            1
        );
        assert_eq!(store.count_appointments().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn set_status_on_missing_id_is_not_found_and_changes_nothing() {
        let store = memory_store().await;
        let before = store.count_appointments().await.unwrap();

        let result = store
            .set_appointment_status(9999, AppointmentStatus::Cancelled)
            .await;
        assert!(matches!(result, Err(PortError::NotFound(_))));
        assert_eq!(store.count_appointments().await.unwrap(), before);
    }

    #[tokio::test]
    async fn confirming_thomas_clears_the_pending_count() {
        let store = memory_store().await;

        let pending = store
            .list_appointments(Some(AppointmentStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].full_name, "Thomas Bernard");

        store
            .set_appointment_status(pending[0].id, AppointmentStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(
            store
                .count_appointments_with_status(AppointmentStatus::Pending)
                .await
                .unwrap(),
            0
        );
        let thomas = store
            .list_appointments(None)
            .await
            .unwrap()
            .into_iter()
            .find(|a| a.id == pending[0].id)
            .unwrap();
        assert_eq!(thomas.status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn total_equals_the_sum_of_status_partitions() {
        let store = memory_store().await;
        store.create_appointment(booking("Ines Moreau")).await.unwrap();

        let total = store.count_appointments().await.unwrap();
        let mut sum = 0;
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
        ] {
            sum += store.count_appointments_with_status(status).await.unwrap();
        }
        assert_eq!(total, sum);
    }

    #[tokio::test]
    async fn today_count_includes_fresh_inserts() {
        let store = memory_store().await;
        // Seeds are inserted "now" too, so all rows count as today's.
        assert_eq!(store.count_appointments_today().await.unwrap(), 3);
        store.create_appointment(booking("Emma Laurent")).await.unwrap();
        assert_eq!(store.count_appointments_today().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn histogram_groups_by_creation_month() {
        let store = memory_store().await;
        let buckets = store.appointments_by_month(6).await.unwrap();

        // All seed rows were created this month.
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, Utc::now().format("%Y-%m").to_string());
        assert_eq!(buckets[0].count, 3);

        store.create_appointment(booking("Hugo Blanc")).await.unwrap();
        let buckets = store.appointments_by_month(6).await.unwrap();
        assert_eq!(buckets[0].count, 4);
    }

    #[tokio::test]
    async fn recent_appointments_respects_the_limit() {
        let store = memory_store().await;
        for i in 0..10 {
            store
                .create_appointment(booking(&format!("Patient {}", i)))
                .await
                .unwrap();
        }
        let recent = store.recent_appointments(10).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].full_name, "Patient 9");
    }

    #[tokio::test]
    async fn gallery_create_returns_the_stored_record() {
        let store = memory_store().await;
        let created = store
            .create_gallery_item(NewGalleryItem {
                title: "Implant unitaire".to_string(),
                description: String::new(),
                before_image: String::new(),
                after_image: String::new(),
                category: "Implant".to_string(),
                treatment_duration: "3 mois".to_string(),
            })
            .await
            .unwrap();

        assert!(created.id > 0);
        assert!(created.visible);
        assert_eq!(created.category, "Implant");
        assert_eq!(store.count_gallery_items().await.unwrap(), 4);

        let listed = store.list_gallery_items().await.unwrap();
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn gallery_delete_removes_exactly_one_row_once() {
        let store = memory_store().await;
        let items = store.list_gallery_items().await.unwrap();
        let target = items[0].id;

        store.delete_gallery_item(target).await.unwrap();
        assert_eq!(store.count_gallery_items().await.unwrap(), 2);

        let second = store.delete_gallery_item(target).await;
        assert!(matches!(second, Err(PortError::NotFound(_))));
        assert_eq!(store.count_gallery_items().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn dashboard_reads_agree_with_each_other() {
        let store = memory_store().await;
        let recent = store.recent_appointments(10).await.unwrap();
        let gallery = store.recent_gallery_items(6).await.unwrap();

        assert_eq!(recent.len() as i64, store.count_appointments().await.unwrap());
        assert_eq!(gallery.len() as i64, store.count_gallery_items().await.unwrap());
    }
}
