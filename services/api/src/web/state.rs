//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use crate::config::Config;
use clinic_core::ports::{ClinicStore, SessionStore};

/// The shared application state, created once at startup and passed to all
/// handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClinicStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<Config>,
}
