//! State: the top of the location hierarchy.

use serde::{Deserialize, Serialize};

use crate::id::StateId;
use crate::kind::Kind;
use crate::record::{Payload, Record};
use crate::time::{Timestamp, now};

/// A state; owns zero or more [`City`](crate::city::City) records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub name: String,
    #[serde(flatten)]
    pub extra: Payload,
}

impl State {
    /// Create a state with fresh identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: StateId::new(),
            created_at: ts,
            updated_at: ts,
            name: name.into(),
            extra: Payload::new(),
        }
    }
}

impl Record for State {
    type Id = StateId;
    const KIND: Kind = Kind::State;

    fn id(&self) -> StateId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_serde_json() {
        let mut state = State::new("Kansas");
        state
            .extra
            .insert("capital".to_string(), serde_json::json!("Topeka"));
        let json = serde_json::to_string(&state).unwrap();
        let parsed: State = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn should_flatten_extra_attributes() {
        let mut state = State::new("Iowa");
        state.extra.insert("code".to_string(), serde_json::json!("IA"));
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["code"], "IA");
    }
}
