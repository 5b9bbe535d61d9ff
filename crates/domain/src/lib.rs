//! # hbnb-domain
//!
//! Pure domain model for the hbnb rental listing API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the six **records**: [`State`](state::State), [`City`](city::City),
//!   [`Place`](place::Place), [`User`](user::User), [`Amenity`](amenity::Amenity)
//!   and [`Review`](review::Review)
//! - Define the [`Record`](record::Record) contract shared by every record
//!   (identity, timestamps, foreign keys, protected keys, dictionary form)
//! - Turn client JSON payloads into records (`record::build`) and merge
//!   partial updates into existing ones (`record::patch`)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod kind;
pub mod record;
pub mod time;

pub mod amenity;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;
