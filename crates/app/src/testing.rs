//! In-memory [`Storage`] used by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, CityId, PlaceId, StateId};
use hbnb_domain::kind::Kind;
use hbnb_domain::place::Place;
use hbnb_domain::record::{Payload, Record};
use hbnb_domain::review::Review;
use serde_json::Value;

use crate::ports::Storage;

pub(crate) fn payload(value: Value) -> Payload {
    serde_json::from_value(value).unwrap()
}

/// Records kept as JSON values, keyed by kind and id. No cascades.
#[derive(Default)]
pub(crate) struct MemoryStorage {
    records: Mutex<HashMap<(Kind, String), Value>>,
}

impl MemoryStorage {
    fn load<R: Record>(&self) -> Vec<R> {
        let records = self.records.lock().unwrap();
        let mut found: Vec<R> = records
            .iter()
            .filter(|((kind, _), _)| *kind == R::KIND)
            .map(|(_, value)| serde_json::from_value(value.clone()).unwrap())
            .collect();
        found.sort_by_key(Record::created_at);
        found
    }

    fn store<R: Record>(&self, record: &R) {
        let value = serde_json::to_value(record).unwrap();
        self.records
            .lock()
            .unwrap()
            .insert((R::KIND, record.id().to_string()), value);
    }

    fn find<R: Record>(&self, id: R::Id) -> Option<R> {
        self.records
            .lock()
            .unwrap()
            .get(&(R::KIND, id.to_string()))
            .map(|value| serde_json::from_value(value.clone()).unwrap())
    }
}

impl Storage for MemoryStorage {
    fn get<R: Record>(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<Option<R>, HbnbError>> + Send {
        let result = self.find(id);
        async { Ok(result) }
    }

    fn all<R: Record>(&self) -> impl Future<Output = Result<Vec<R>, HbnbError>> + Send {
        let result = self.load();
        async { Ok(result) }
    }

    fn insert<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send {
        self.store(&record);
        async { Ok(record) }
    }

    fn update<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send {
        let mut record = record;
        let result = match self.find::<R>(record.id()) {
            Some(mut stored) => {
                if let (Some(current), Some(incoming)) =
                    (stored.amenity_ids_mut(), record.amenity_ids_mut())
                {
                    *incoming = std::mem::take(current);
                }
                self.store(&record);
                Ok(record)
            }
            None => Err(NotFoundError::new(R::KIND, record.id()).into()),
        };
        async { result }
    }

    fn delete<R: Record>(&self, id: R::Id) -> impl Future<Output = Result<(), HbnbError>> + Send {
        self.records
            .lock()
            .unwrap()
            .remove(&(R::KIND, id.to_string()));
        async { Ok(()) }
    }

    fn count(&self, kind: Kind) -> impl Future<Output = Result<u64, HbnbError>> + Send {
        let count = self
            .records
            .lock()
            .unwrap()
            .keys()
            .filter(|(k, _)| *k == kind)
            .count() as u64;
        async move { Ok(count) }
    }

    fn cities_of(
        &self,
        state: StateId,
    ) -> impl Future<Output = Result<Vec<City>, HbnbError>> + Send {
        let mut cities: Vec<City> = self.load();
        cities.retain(|city| city.state_id == state);
        async { Ok(cities) }
    }

    fn places_of(
        &self,
        city: CityId,
    ) -> impl Future<Output = Result<Vec<Place>, HbnbError>> + Send {
        let mut places: Vec<Place> = self.load();
        places.retain(|place| place.city_id == city);
        async { Ok(places) }
    }

    fn reviews_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Review>, HbnbError>> + Send {
        let mut reviews: Vec<Review> = self.load();
        reviews.retain(|review| review.place_id == place);
        async { Ok(reviews) }
    }

    fn amenities_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Amenity>, HbnbError>> + Send {
        let linked = self
            .find::<Place>(place)
            .map(|place| place.amenity_ids)
            .unwrap_or_default();
        let mut amenities: Vec<Amenity> = self.load();
        amenities.retain(|amenity| linked.contains(&amenity.id));
        async { Ok(amenities) }
    }

    fn link_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        let mut linked = false;
        if let Some(mut found) = self.find::<Place>(place) {
            if !found.amenity_ids.contains(&amenity) {
                found.amenity_ids.push(amenity);
                self.store(&found);
                linked = true;
            }
        }
        async move { Ok(linked) }
    }

    fn unlink_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        let mut unlinked = false;
        if let Some(mut found) = self.find::<Place>(place) {
            let before = found.amenity_ids.len();
            found.amenity_ids.retain(|id| *id != amenity);
            if found.amenity_ids.len() != before {
                self.store(&found);
                unlinked = true;
            }
        }
        async move { Ok(unlinked) }
    }
}
