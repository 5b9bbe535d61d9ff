//! Review: a user's text about a place.

use serde::{Deserialize, Serialize};

use crate::id::{PlaceId, ReviewId, UserId};
use crate::kind::Kind;
use crate::record::{Payload, Record};
use crate::time::{Timestamp, now};

/// A review written by a [`User`](crate::user::User) about a
/// [`Place`](crate::place::Place).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub place_id: PlaceId,
    pub user_id: UserId,
    pub text: String,
    #[serde(flatten)]
    pub extra: Payload,
}

impl Review {
    /// Create a review with fresh identity.
    #[must_use]
    pub fn new(place_id: PlaceId, user_id: UserId, text: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: ReviewId::new(),
            created_at: ts,
            updated_at: ts,
            place_id,
            user_id,
            text: text.into(),
            extra: Payload::new(),
        }
    }
}

impl Record for Review {
    type Id = ReviewId;
    const KIND: Kind = Kind::Review;
    const PROTECTED: &'static [&'static str] = &["place_id", "user_id"];

    fn id(&self) -> ReviewId {
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
            ("place_id", self.place_id.to_string()),
            ("user_id", self.user_id.to_string()),
        ]
    }
}
