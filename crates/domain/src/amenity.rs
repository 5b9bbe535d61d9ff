//! Amenity: a feature a place can offer, such as wifi or a pool.

use serde::{Deserialize, Serialize};

use crate::id::AmenityId;
use crate::kind::Kind;
use crate::record::{Payload, Record};
use crate::time::{Timestamp, now};

/// An amenity, linked many-to-many with [`Place`](crate::place::Place).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: AmenityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub name: String,
    #[serde(flatten)]
    pub extra: Payload,
}

impl Amenity {
    /// Create an amenity with fresh identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: AmenityId::new(),
            created_at: ts,
            updated_at: ts,
            name: name.into(),
            extra: Payload::new(),
        }
    }
}

impl Record for Amenity {
    type Id = AmenityId;
    const KIND: Kind = Kind::Amenity;

    fn id(&self) -> AmenityId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
