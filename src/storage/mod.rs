//! SQLite persistence for user preferences.

mod preferences;
mod schema;
mod types;

pub use schema::Database;
pub use types::DatabaseError;
