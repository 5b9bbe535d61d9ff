//! # hbnb-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage port** ([`ports::Storage`]) that every backing
//!   store implements: record CRUD, counts, parent/child lookups and the
//!   place / amenity link operations
//! - Define the **driving ports** as service structs, one per resource group:
//!   - `StateService`, `CityService`, `PlaceService` (incl. search),
//!     `ReviewService`, `UserService`, `AmenityService`
//!   - `PlaceAmenityService`: link resource between places and amenities
//!   - `StatsService`: per-kind record counts
//! - Enforce request-level rules: parents resolve before payloads are
//!   checked, then required fields and protected keys
//!
//! ## Dependency rule
//! Depends on `hbnb-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
