//! Place / amenity link service.
//!
//! The link representation (join table or id list on the place) belongs to
//! the storage backend; this service only sees the port's link operations.

use hbnb_domain::amenity::Amenity;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, PlaceId};
use hbnb_domain::kind::Kind;
use hbnb_domain::place::Place;

use super::crud;
use crate::ports::Storage;

/// Outcome of a link request.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    /// The link was created.
    Created(Amenity),
    /// The pair was already linked; nothing changed.
    Existing(Amenity),
}

/// Application service for the place-amenity link resource.
pub struct PlaceAmenityService<S> {
    storage: S,
}

impl<S: Storage> PlaceAmenityService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List the amenities linked to a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist,
    /// or a storage error from the backend.
    pub async fn list_amenities(&self, place_id: PlaceId) -> Result<Vec<Amenity>, HbnbError> {
        crud::fetch::<S, Place>(&self.storage, place_id).await?;
        self.storage.amenities_of(place_id).await
    }

    /// Link an amenity to a place. Linking twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or the amenity does
    /// not exist, or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn link_amenity(
        &self,
        place_id: PlaceId,
        amenity_id: AmenityId,
    ) -> Result<Link, HbnbError> {
        crud::fetch::<S, Place>(&self.storage, place_id).await?;
        let amenity: Amenity = crud::fetch(&self.storage, amenity_id).await?;
        if self.storage.link_amenity(place_id, amenity_id).await? {
            Ok(Link::Created(amenity))
        } else {
            Ok(Link::Existing(amenity))
        }
    }

    /// Remove the link between an amenity and a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or the amenity does
    /// not exist or when they are not linked, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn unlink_amenity(
        &self,
        place_id: PlaceId,
        amenity_id: AmenityId,
    ) -> Result<(), HbnbError> {
        crud::fetch::<S, Place>(&self.storage, place_id).await?;
        crud::fetch::<S, Amenity>(&self.storage, amenity_id).await?;
        if self.storage.unlink_amenity(place_id, amenity_id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new(Kind::Amenity, amenity_id).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStorage;
    use hbnb_domain::city::City;
    use hbnb_domain::id::{StateId, UserId};
    use std::sync::Arc;

    async fn setup() -> (PlaceAmenityService<Arc<MemoryStorage>>, PlaceId, Amenity) {
        let storage = Arc::new(MemoryStorage::default());
        let city = storage
            .insert(City::new(StateId::new(), "Austin"))
            .await
            .unwrap();
        let place = storage
            .insert(Place::new(city.id, UserId::new(), "Ranch"))
            .await
            .unwrap();
        let amenity = storage.insert(Amenity::new("Pool")).await.unwrap();
        (PlaceAmenityService::new(storage), place.id, amenity)
    }

    #[tokio::test]
    async fn should_create_link_then_report_existing() {
        let (svc, place_id, amenity) = setup().await;

        let first = svc.link_amenity(place_id, amenity.id).await.unwrap();
        let second = svc.link_amenity(place_id, amenity.id).await.unwrap();

        assert_eq!(first, Link::Created(amenity.clone()));
        assert_eq!(second, Link::Existing(amenity.clone()));
        assert_eq!(svc.list_amenities(place_id).await.unwrap(), vec![amenity]);
    }

    #[tokio::test]
    async fn should_return_not_found_when_unlinking_unlinked_amenity() {
        let (svc, place_id, amenity) = setup().await;
        let result = svc.unlink_amenity(place_id, amenity.id).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_unlink_linked_amenity() {
        let (svc, place_id, amenity) = setup().await;
        svc.link_amenity(place_id, amenity.id).await.unwrap();

        svc.unlink_amenity(place_id, amenity.id).await.unwrap();

        assert!(svc.list_amenities(place_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_place_or_amenity() {
        let (svc, place_id, amenity) = setup().await;
        assert!(matches!(
            svc.link_amenity(PlaceId::new(), amenity.id).await,
            Err(HbnbError::NotFound(_))
        ));
        assert!(matches!(
            svc.link_amenity(place_id, AmenityId::new()).await,
            Err(HbnbError::NotFound(_))
        ));
        assert!(matches!(
            svc.list_amenities(PlaceId::new()).await,
            Err(HbnbError::NotFound(_))
        ));
    }
}
