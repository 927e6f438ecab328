//! Data layer module
//!
//! Handles persistence of users, accounts and sessions:
//! - PostgreSQL database operations
//! - In-memory store (volatile)

mod database;
mod memory;
mod models;
mod store;

pub use database::Database;
pub use memory::MemoryStore;
pub use models::*;
pub use store::AuthStore;
