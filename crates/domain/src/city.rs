//! City: belongs to a state, holds places.

use serde::{Deserialize, Serialize};

use crate::id::{CityId, StateId};
use crate::kind::Kind;
use crate::record::{Payload, Record};
use crate::time::{Timestamp, now};

/// A city inside a [`State`](crate::state::State).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub state_id: StateId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Payload,
}

impl City {
    /// Create a city with fresh identity inside `state_id`.
    #[must_use]
    pub fn new(state_id: StateId, name: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: CityId::new(),
            created_at: ts,
            updated_at: ts,
            state_id,
            name: name.into(),
            extra: Payload::new(),
        }
    }
}

impl Record for City {
    type Id = CityId;
    const KIND: Kind = Kind::City;
    const PROTECTED: &'static [&'static str] = &["state_id"];

    fn id(&self) -> CityId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn foreign_keys(&self) -> Vec<(&'static str, String)> {
        vec![("state_id", self.state_id.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_state_as_foreign_key() {
        let state_id = StateId::new();
        let city = City::new(state_id, "Denver");
        assert_eq!(city.foreign_keys(), vec![("state_id", state_id.to_string())]);
    }
}
