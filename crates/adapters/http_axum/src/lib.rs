//! # hbnb-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON REST API under `/api/v1` (`/states`, `/cities`,
//!   `/places`, `/places_search`, `/amenities`, `/users`, `/reviews`,
//!   `/status`, `/stats`)
//! - Turn request bodies into optional payloads and path segments into ids
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the storage port and services) and
//! `hbnb-domain` (for records and errors). Never leaks axum types into the
//! domain.

pub mod api;
mod error;
mod extract;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use extract::JsonPayload;
