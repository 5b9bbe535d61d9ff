//! Application services: use-case implementations.
//!
//! Each service struct accepts a [`Storage`](crate::ports::Storage)
//! implementation via a generic parameter (constructor injection), keeping
//! this layer decoupled from concrete adapters.

mod crud;

pub mod amenity_service;
pub mod city_service;
pub mod place_amenity_service;
pub mod place_service;
pub mod review_service;
pub mod state_service;
pub mod stats_service;
pub mod user_service;
