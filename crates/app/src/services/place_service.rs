//! Place service: use-cases for places nested under cities, and search.

use std::collections::HashSet;

use serde::Deserialize;

use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, ValidationError};
use hbnb_domain::id::{AmenityId, CityId, PlaceId, StateId};
use hbnb_domain::place::Place;
use hbnb_domain::record::{Payload, require};
use hbnb_domain::user::User;

use super::crud;
use crate::ports::Storage;

/// Filters accepted by `POST /places_search`.
///
/// Every list holds raw ids; ids that do not resolve are skipped.
#[derive(Debug, Default, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    states: Option<Vec<String>>,
    #[serde(default)]
    cities: Option<Vec<String>>,
    #[serde(default)]
    amenities: Option<Vec<String>>,
}

impl SearchFilter {
    /// Read the filter lists out of a search payload. Other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAttribute`] when a list is not an
    /// array of strings.
    pub fn from_payload(payload: Payload) -> Result<Self, HbnbError> {
        serde_json::from_value(serde_json::Value::Object(payload))
            .map_err(|err| ValidationError::InvalidAttribute(err.to_string()).into())
    }

    fn states(&self) -> &[String] {
        self.states.as_deref().unwrap_or_default()
    }

    fn cities(&self) -> &[String] {
        self.cities.as_deref().unwrap_or_default()
    }

    fn amenities(&self) -> &[String] {
        self.amenities.as_deref().unwrap_or_default()
    }

    fn is_empty(&self) -> bool {
        self.states().is_empty() && self.cities().is_empty() && self.amenities().is_empty()
    }
}

/// Application service for place CRUD operations and search.
pub struct PlaceService<S> {
    storage: S,
}

impl<S: Storage> PlaceService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List the places of a city.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city does not exist,
    /// or a storage error from the backend.
    pub async fn list_places(&self, city_id: CityId) -> Result<Vec<Place>, HbnbError> {
        crud::fetch::<S, City>(&self.storage, city_id).await?;
        self.storage.places_of(city_id).await
    }

    /// Look up a place by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no place with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_place(&self, id: PlaceId) -> Result<Place, HbnbError> {
        crud::fetch(&self.storage, id).await
    }

    /// Create a place inside a city, owned by the payload's `user_id`.
    ///
    /// Checks run in order: city exists, body present, `user_id` present,
    /// user exists, `name` present.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city or the user does not
    /// exist, [`HbnbError::Validation`] for an absent body or a missing
    /// field, or a storage error from the backend.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create_place(
        &self,
        city_id: CityId,
        payload: Option<Payload>,
    ) -> Result<Place, HbnbError> {
        crud::fetch::<S, City>(&self.storage, city_id).await?;
        let payload = crud::body(payload)?;
        require(&payload, "user_id")?;
        crud::referenced::<S, User>(&self.storage, &payload, "user_id").await?;
        require(&payload, "name")?;
        crud::create(&self.storage, payload, [("city_id", city_id.to_string())]).await
    }

    /// Apply a partial update to a place.
    ///
    /// `city_id`, `user_id` and `amenity_ids` cannot be changed this way.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the place does not exist,
    /// [`HbnbError::Validation`] for an absent body, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_place(
        &self,
        id: PlaceId,
        payload: Option<Payload>,
    ) -> Result<Place, HbnbError> {
        crud::update(&self.storage, id, payload).await
    }

    /// Delete a place together with its reviews and amenity links.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the place does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_place(&self, id: PlaceId) -> Result<(), HbnbError> {
        crud::remove::<S, Place>(&self.storage, id).await
    }

    /// Search places by states, cities and amenities.
    ///
    /// With no filter every place is returned. Otherwise the candidates are
    /// the places of every listed state's cities plus the places of every
    /// listed city (every place when both lists are empty), deduplicated;
    /// a non-empty amenity list then keeps only places linked to all of them.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when a filter list is malformed,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self, payload))]
    pub async fn search_places(&self, payload: Option<Payload>) -> Result<Vec<Place>, HbnbError> {
        let filter = payload
            .map(SearchFilter::from_payload)
            .transpose()?
            .unwrap_or_default();

        if filter.is_empty() {
            return self.storage.all::<Place>().await;
        }

        let mut places = if filter.states().is_empty() && filter.cities().is_empty() {
            self.storage.all::<Place>().await?
        } else {
            self.candidates(&filter).await?
        };

        if !filter.amenities().is_empty() {
            // an amenity id that does not parse is linked to no place
            let wanted: Option<Vec<AmenityId>> = filter
                .amenities()
                .iter()
                .map(|raw| raw.parse().ok())
                .collect();
            match wanted {
                Some(wanted) => places.retain(|place| place.has_all_amenities(&wanted)),
                None => places.clear(),
            }
        }

        tracing::debug!(found = places.len(), "place search complete");
        Ok(places)
    }

    async fn candidates(&self, filter: &SearchFilter) -> Result<Vec<Place>, HbnbError> {
        let mut city_ids = Vec::new();
        for raw in filter.states() {
            let Ok(state_id) = raw.parse::<StateId>() else {
                continue;
            };
            for city in self.storage.cities_of(state_id).await? {
                city_ids.push(city.id);
            }
        }
        city_ids.extend(
            filter
                .cities()
                .iter()
                .filter_map(|raw| raw.parse::<CityId>().ok()),
        );

        let mut seen = HashSet::new();
        let mut places = Vec::new();
        for city_id in city_ids {
            for place in self.storage.places_of(city_id).await? {
                if seen.insert(place.id) {
                    places.push(place);
                }
            }
        }
        Ok(places)
    }
}
