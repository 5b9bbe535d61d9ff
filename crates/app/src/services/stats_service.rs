//! Stats service: record counts per kind.

use serde::Serialize;

use hbnb_domain::error::HbnbError;
use hbnb_domain::kind::Kind;

use crate::ports::Storage;

/// Number of stored records of each kind, as reported by `/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub amenities: u64,
    pub cities: u64,
    pub places: u64,
    pub reviews: u64,
    pub states: u64,
    pub users: u64,
}

/// Application service computing [`Stats`].
pub struct StatsService<S> {
    storage: S,
}

impl<S: Storage> StatsService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Count the records of every kind.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn stats(&self) -> Result<Stats, HbnbError> {
        let mut stats = Stats::default();
        for kind in Kind::ALL {
            let count = self.storage.count(kind).await?;
            let slot = match kind {
                Kind::Amenity => &mut stats.amenities,
                Kind::City => &mut stats.cities,
                Kind::Place => &mut stats.places,
                Kind::Review => &mut stats.reviews,
                Kind::State => &mut stats.states,
                Kind::User => &mut stats.users,
            };
            *slot = count;
        }
        Ok(stats)
    }
}
