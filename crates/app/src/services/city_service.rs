//! City service: use-cases for cities nested under states.

use hbnb_domain::city::City;
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{CityId, StateId};
use hbnb_domain::record::{Payload, require};
use hbnb_domain::state::State;

use super::crud;
use crate::ports::Storage;

/// Application service for city CRUD operations.
pub struct CityService<S> {
    storage: S,
}

impl<S: Storage> CityService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List the cities of a state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist,
    /// or a storage error from the backend.
    pub async fn list_cities(&self, state_id: StateId) -> Result<Vec<City>, HbnbError> {
        crud::fetch::<S, State>(&self.storage, state_id).await?;
        self.storage.cities_of(state_id).await
    }

    /// Look up a city by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no city with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_city(&self, id: CityId) -> Result<City, HbnbError> {
        crud::fetch(&self.storage, id).await
    }

    /// Create a city inside a state; `name` is required.
    ///
    /// The state is resolved before the payload is validated.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist,
    /// [`HbnbError::Validation`] for an absent body or missing name,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create_city(
        &self,
        state_id: StateId,
        payload: Option<Payload>,
    ) -> Result<City, HbnbError> {
        crud::fetch::<S, State>(&self.storage, state_id).await?;
        let payload = crud::body(payload)?;
        require(&payload, "name")?;
        crud::create(&self.storage, payload, [("state_id", state_id.to_string())]).await
    }

    /// Apply a partial update to a city. `state_id` cannot be changed.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the city does not exist,
    /// [`HbnbError::Validation`] for an absent body, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_city(
        &self,
        id: CityId,
        payload: Option<Payload>,
    ) -> Result<City, HbnbError> {
        crud::update(&self.storage, id, payload).await
    }

    /// Delete a city together with its places.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the city does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_city(&self, id: CityId) -> Result<(), HbnbError> {
        crud::remove::<S, City>(&self.storage, id).await
    }
}
