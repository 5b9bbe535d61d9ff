//! Record kinds and the relations between them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six kinds of record the API manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl Kind {
    /// Every kind, in the order `/stats` reports them.
    pub const ALL: [Self; 6] = [
        Self::Amenity,
        Self::City,
        Self::Place,
        Self::Review,
        Self::State,
        Self::User,
    ];

    /// Class name exposed as `__class__` in the dictionary form.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Amenity => "Amenity",
            Self::City => "City",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::State => "State",
            Self::User => "User",
        }
    }

    /// Plural collection name, used for routes, stats keys and table names.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Amenity => "amenities",
            Self::City => "cities",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::State => "states",
            Self::User => "users",
        }
    }

    /// Kinds holding a foreign key to this kind, with the key name.
    ///
    /// Deleting a record of this kind deletes those dependents too.
    #[must_use]
    pub fn dependents(self) -> &'static [(Self, &'static str)] {
        match self {
            Self::State => &[(Self::City, "state_id")],
            Self::City => &[(Self::Place, "city_id")],
            Self::Place => &[(Self::Review, "place_id")],
            Self::User => &[(Self::Place, "user_id"), (Self::Review, "user_id")],
            Self::Amenity | Self::Review => &[],
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_list_every_kind_once() {
        let mut kinds = Kind::ALL.to_vec();
        kinds.dedup();
        assert_eq!(kinds.len(), 6);
    }

    #[test]
    fn should_display_class_name() {
        assert_eq!(Kind::Amenity.to_string(), "Amenity");
        assert_eq!(Kind::State.to_string(), "State");
    }

    #[test]
    fn should_pluralize_collection_names() {
        assert_eq!(Kind::City.collection(), "cities");
        assert_eq!(Kind::Amenity.collection(), "amenities");
    }

    #[test]
    fn should_cascade_user_to_places_and_reviews() {
        let dependents: Vec<Kind> = Kind::User.dependents().iter().map(|d| d.0).collect();
        assert_eq!(dependents, vec![Kind::Place, Kind::Review]);
    }

    #[test]
    fn should_have_no_dependents_for_leaf_kinds() {
        assert!(Kind::Review.dependents().is_empty());
        assert!(Kind::Amenity.dependents().is_empty());
    }
}
