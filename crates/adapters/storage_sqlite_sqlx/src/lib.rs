//! # hbnb-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`Storage`](hbnb_app::ports::Storage) port for every record kind
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Keep place/amenity links in a join table and cascade deletes through
//!   foreign keys
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the port trait) and `hbnb-domain` (for records).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
pub mod pool;
mod storage;

pub use error::StorageError;
pub use storage::SqliteStorage;
