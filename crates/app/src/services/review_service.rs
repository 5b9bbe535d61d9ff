//! Review service: use-cases for reviews nested under places.

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{PlaceId, ReviewId};
use hbnb_domain::place::Place;
use hbnb_domain::record::{Payload, require};
use hbnb_domain::review::Review;
use hbnb_domain::user::User;

use super::crud;
use crate::ports::Storage;

/// Application service for review CRUD operations.
pub struct ReviewService<S> {
    storage: S,
}

impl<S: Storage> ReviewService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List the reviews of a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist,
    /// or a storage error from the backend.
    pub async fn list_reviews(&self, place_id: PlaceId) -> Result<Vec<Review>, HbnbError> {
        crud::fetch::<S, Place>(&self.storage, place_id).await?;
        self.storage.reviews_of(place_id).await
    }

    /// Look up a review by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no review with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_review(&self, id: ReviewId) -> Result<Review, HbnbError> {
        crud::fetch(&self.storage, id).await
    }

    /// Create a review of a place by the payload's `user_id`.
    ///
    /// Checks run in order: place exists, body present, `user_id` present,
    /// user exists, `text` present.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or the user does not
    /// exist, [`HbnbError::Validation`] for an absent body or a missing
    /// field, or a storage error from the backend.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create_review(
        &self,
        place_id: PlaceId,
        payload: Option<Payload>,
    ) -> Result<Review, HbnbError> {
        crud::fetch::<S, Place>(&self.storage, place_id).await?;
        let payload = crud::body(payload)?;
        require(&payload, "user_id")?;
        crud::referenced::<S, User>(&self.storage, &payload, "user_id").await?;
        require(&payload, "text")?;
        crud::create(&self.storage, payload, [("place_id", place_id.to_string())]).await
    }

    /// Apply a partial update to a review. Only the text and extra
    /// attributes can change.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the review does not exist,
    /// [`HbnbError::Validation`] for an absent body, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_review(
        &self,
        id: ReviewId,
        payload: Option<Payload>,
    ) -> Result<Review, HbnbError> {
        crud::update(&self.storage, id, payload).await
    }

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the review does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId) -> Result<(), HbnbError> {
        crud::remove::<S, Review>(&self.storage, id).await
    }
}
