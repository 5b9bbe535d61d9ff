//! Storage port: persistence for every record kind.
//!
//! One trait covers all kinds: records describe themselves through
//! [`Record`], so a backend stores them generically and only the relation
//! queries name concrete types. Each backing mode (relational, file) provides
//! one implementation; services never branch on the active mode.

use std::future::Future;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{AmenityId, CityId, PlaceId, StateId};
use hbnb_domain::kind::Kind;
use hbnb_domain::place::Place;
use hbnb_domain::record::Record;
use hbnb_domain::review::Review;

/// Persistence for records and the relations between them.
///
/// Every mutation is durable once its future resolves. Places returned by any
/// method carry their current `amenity_ids`.
pub trait Storage: Send + Sync {
    /// Get a record by its unique identifier.
    fn get<R: Record>(&self, id: R::Id)
    -> impl Future<Output = Result<Option<R>, HbnbError>> + Send;

    /// Get every record of kind `R`.
    fn all<R: Record>(&self) -> impl Future<Output = Result<Vec<R>, HbnbError>> + Send;

    /// Persist a new record.
    fn insert<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send;

    /// Persist changes to an existing record.
    ///
    /// Fails with [`HbnbError::NotFound`] when the record no longer exists.
    /// The amenity links of a place are kept as stored; only
    /// [`Storage::link_amenity`] and [`Storage::unlink_amenity`] change them.
    fn update<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send;

    /// Delete a record and everything that depends on it.
    ///
    /// Dependents follow [`Kind::dependents`]; deleting a place or an amenity
    /// also drops their links. Deleting an unknown id is a no-op.
    fn delete<R: Record>(&self, id: R::Id) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Number of stored records of `kind`.
    fn count(&self, kind: Kind) -> impl Future<Output = Result<u64, HbnbError>> + Send;

    /// Cities of a state (empty when the state does not exist).
    fn cities_of(&self, state: StateId)
    -> impl Future<Output = Result<Vec<City>, HbnbError>> + Send;

    /// Places of a city (empty when the city does not exist).
    fn places_of(&self, city: CityId) -> impl Future<Output = Result<Vec<Place>, HbnbError>> + Send;

    /// Reviews of a place (empty when the place does not exist).
    fn reviews_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Review>, HbnbError>> + Send;

    /// Amenities linked to a place.
    fn amenities_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Amenity>, HbnbError>> + Send;

    /// Link an amenity to a place.
    ///
    /// Returns `false` when the pair was already linked (nothing changes).
    fn link_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send;

    /// Remove the link between an amenity and a place.
    ///
    /// Returns `false` when the pair was not linked.
    fn unlink_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send;
}

impl<T: Storage> Storage for std::sync::Arc<T> {
    fn get<R: Record>(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<Option<R>, HbnbError>> + Send {
        (**self).get::<R>(id)
    }

    fn all<R: Record>(&self) -> impl Future<Output = Result<Vec<R>, HbnbError>> + Send {
        (**self).all::<R>()
    }

    fn insert<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send {
        (**self).insert::<R>(record)
    }

    fn update<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send {
        (**self).update::<R>(record)
    }

    fn delete<R: Record>(&self, id: R::Id) -> impl Future<Output = Result<(), HbnbError>> + Send {
        (**self).delete::<R>(id)
    }

    fn count(&self, kind: Kind) -> impl Future<Output = Result<u64, HbnbError>> + Send {
        (**self).count(kind)
    }

    fn cities_of(
        &self,
        state: StateId,
    ) -> impl Future<Output = Result<Vec<City>, HbnbError>> + Send {
        (**self).cities_of(state)
    }

    fn places_of(&self, city: CityId) -> impl Future<Output = Result<Vec<Place>, HbnbError>> + Send {
        (**self).places_of(city)
    }

    fn reviews_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Review>, HbnbError>> + Send {
        (**self).reviews_of(place)
    }

    fn amenities_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Amenity>, HbnbError>> + Send {
        (**self).amenities_of(place)
    }

    fn link_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        (**self).link_amenity(place, amenity)
    }

    fn unlink_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        (**self).unlink_amenity(place, amenity)
    }
}
