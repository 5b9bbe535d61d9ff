//! Shared application state for axum handlers.

use std::sync::Arc;

use hbnb_app::ports::Storage;
use hbnb_app::services::amenity_service::AmenityService;
use hbnb_app::services::city_service::CityService;
use hbnb_app::services::place_amenity_service::PlaceAmenityService;
use hbnb_app::services::place_service::PlaceService;
use hbnb_app::services::review_service::ReviewService;
use hbnb_app::services::state_service::StateService;
use hbnb_app::services::stats_service::StatsService;
use hbnb_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the storage backend to avoid dynamic dispatch. `Clone` is
/// implemented manually so the storage itself does not need to be `Clone`
/// once the services are built; only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    /// State CRUD service.
    pub state_service: Arc<StateService<S>>,
    /// City CRUD service.
    pub city_service: Arc<CityService<S>>,
    /// Place CRUD and search service.
    pub place_service: Arc<PlaceService<S>>,
    /// Review CRUD service.
    pub review_service: Arc<ReviewService<S>>,
    /// User CRUD service.
    pub user_service: Arc<UserService<S>>,
    /// Amenity CRUD service.
    pub amenity_service: Arc<AmenityService<S>>,
    /// Place/amenity link service.
    pub place_amenity_service: Arc<PlaceAmenityService<S>>,
    /// Record counts.
    pub stats_service: Arc<StatsService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            state_service: Arc::clone(&self.state_service),
            city_service: Arc::clone(&self.city_service),
            place_service: Arc::clone(&self.place_service),
            review_service: Arc::clone(&self.review_service),
            user_service: Arc::clone(&self.user_service),
            amenity_service: Arc::clone(&self.amenity_service),
            place_amenity_service: Arc::clone(&self.place_amenity_service),
            stats_service: Arc::clone(&self.stats_service),
        }
    }
}

impl<S> AppState<S>
where
    S: Storage + Clone + 'static,
{
    /// Build every service on top of one storage handle.
    pub fn new(storage: S) -> Self {
        Self {
            state_service: Arc::new(StateService::new(storage.clone())),
            city_service: Arc::new(CityService::new(storage.clone())),
            place_service: Arc::new(PlaceService::new(storage.clone())),
            review_service: Arc::new(ReviewService::new(storage.clone())),
            user_service: Arc::new(UserService::new(storage.clone())),
            amenity_service: Arc::new(AmenityService::new(storage.clone())),
            place_amenity_service: Arc::new(PlaceAmenityService::new(storage.clone())),
            stats_service: Arc::new(StatsService::new(storage)),
        }
    }
}
