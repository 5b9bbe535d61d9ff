//! Place: a rental listing inside a city, owned by a user.

use serde::{Deserialize, Serialize};

use crate::id::{AmenityId, CityId, PlaceId, UserId};
use crate::kind::Kind;
use crate::record::{Payload, Record};
use crate::time::{Timestamp, now};

/// A rental listing.
///
/// `amenity_ids` mirrors the place's links to [`Amenity`](crate::amenity::Amenity)
/// records; it is only changed through the link operations of the storage port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub city_id: CityId,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub amenity_ids: Vec<AmenityId>,
    #[serde(flatten)]
    pub extra: Payload,
}

impl Place {
    /// Create a place with fresh identity and default attributes.
    #[must_use]
    pub fn new(city_id: CityId, user_id: UserId, name: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: PlaceId::new(),
            created_at: ts,
            updated_at: ts,
            city_id,
            user_id,
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
            extra: Payload::new(),
        }
    }

    /// Whether every id in `wanted` is linked to this place.
    #[must_use]
    pub fn has_all_amenities(&self, wanted: &[AmenityId]) -> bool {
        wanted.iter().all(|id| self.amenity_ids.contains(id))
    }
}

impl Record for Place {
    type Id = PlaceId;
    const KIND: Kind = Kind::Place;
    const PROTECTED: &'static [&'static str] = &["city_id", "user_id", "amenity_ids"];

    fn id(&self) -> PlaceId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn foreign_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("city_id", self.city_id.to_string()),
            ("user_id", self.user_id.to_string()),
        ]
    }

    fn amenity_ids_mut(&mut self) -> Option<&mut Vec<AmenityId>> {
        Some(&mut self.amenity_ids)
    }
}
