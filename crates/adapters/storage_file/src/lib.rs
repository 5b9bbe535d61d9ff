//! # hbnb-adapter-storage-file
//!
//! File-backed persistence adapter: every record lives in one JSON object,
//! keyed `"<Class>.<id>"`, rewritten to disk after each mutation.
//!
//! ## Responsibilities
//! - Implement the [`Storage`](hbnb_app::ports::Storage) port
//! - Load the object file at startup, persist it atomically on change
//! - Keep place / amenity links as the `amenity_ids` list of each place
//! - Cascade deletes along [`Kind::dependents`](hbnb_domain::kind::Kind::dependents)
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the port trait) and `hbnb-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod storage;

pub use error::StorageError;
pub use storage::FileStorage;
