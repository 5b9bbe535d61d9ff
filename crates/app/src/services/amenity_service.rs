//! Amenity service: use-cases for managing amenities.

use hbnb_domain::amenity::Amenity;
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::AmenityId;
use hbnb_domain::record::{Payload, require};

use super::crud;
use crate::ports::Storage;

/// Application service for amenity CRUD operations.
pub struct AmenityService<S> {
    storage: S,
}

impl<S: Storage> AmenityService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List all amenities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_amenities(&self) -> Result<Vec<Amenity>, HbnbError> {
        self.storage.all::<Amenity>().await
    }

    /// Look up an amenity by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no amenity with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_amenity(&self, id: AmenityId) -> Result<Amenity, HbnbError> {
        crud::fetch(&self.storage, id).await
    }

    /// Create an amenity; `name` is required.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] for an absent body or missing name,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create_amenity(&self, payload: Option<Payload>) -> Result<Amenity, HbnbError> {
        let payload = crud::body(payload)?;
        require(&payload, "name")?;
        crud::create(&self.storage, payload, []).await
    }

    /// Apply a partial update to an amenity.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the amenity does not exist,
    /// [`HbnbError::Validation`] for an absent body, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_amenity(
        &self,
        id: AmenityId,
        payload: Option<Payload>,
    ) -> Result<Amenity, HbnbError> {
        crud::update(&self.storage, id, payload).await
    }

    /// Delete an amenity; its links to places go with it.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the amenity does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_amenity(&self, id: AmenityId) -> Result<(), HbnbError> {
        crud::remove::<S, Amenity>(&self.storage, id).await
    }
}
