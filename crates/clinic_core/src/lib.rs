pub mod auth;
pub mod domain;
pub mod ports;

pub use domain::{
    AdminUser, Appointment, AppointmentStatus, GalleryItem, MonthlyCount, NewAppointment,
    NewGalleryItem,
};
pub use ports::{ClinicStore, PortError, PortResult, SessionData, SessionStore};
