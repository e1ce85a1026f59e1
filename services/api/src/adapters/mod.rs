pub mod db;
pub mod session;

pub use db::{SeedAdmin, SqliteStore};
pub use session::MemorySessionStore;
