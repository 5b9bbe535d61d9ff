//! The contract shared by every record, and payload merging.
//!
//! Records are typed structs with an open `extra` map flattened into them, so
//! a client payload can carry attributes the schema does not know about. New
//! records are built from a payload with [`build`]; updates are merged into an
//! existing record with [`patch`], which skips [protected keys](Record::PROTECTED).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{HbnbError, NotFoundError, ValidationError};
use crate::id::{AmenityId, RecordId};
use crate::kind::Kind;
use crate::time::{Timestamp, now};

/// A JSON object as sent by clients.
pub type Payload = Map<String, Value>;

/// Keys no payload may set, for every kind.
pub const BASE_PROTECTED: &[&str] = &["id", "created_at", "updated_at", "__class__"];

/// Identity, timestamps and serialization shared by all records.
pub trait Record: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Typed identifier of this record.
    type Id: RecordId;

    /// Which kind of record this is.
    const KIND: Kind;

    /// Keys an update may not touch, on top of [`BASE_PROTECTED`].
    const PROTECTED: &'static [&'static str] = &[];

    fn id(&self) -> Self::Id;

    fn created_at(&self) -> Timestamp;

    fn updated_at(&self) -> Timestamp;

    /// Foreign keys held by this record, as `(key, referenced id)` pairs.
    fn foreign_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Amenity links carried on the record itself, if this kind has any.
    fn amenity_ids_mut(&mut self) -> Option<&mut Vec<AmenityId>> {
        None
    }

    /// Dictionary form returned to clients: every field plus `__class__`.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Serialization`] if the record cannot be encoded.
    fn to_dict(&self) -> Result<Payload, HbnbError> {
        let mut dict = to_payload(self)?;
        dict.insert(
            "__class__".to_string(),
            Value::String(Self::KIND.class_name().to_string()),
        );
        Ok(dict)
    }
}

/// Whether `key` may not be set through an update of `R`.
#[must_use]
pub fn is_protected<R: Record>(key: &str) -> bool {
    BASE_PROTECTED.contains(&key) || R::PROTECTED.contains(&key)
}

/// Fail with [`ValidationError::MissingField`] when `field` is absent.
///
/// # Errors
///
/// Returns [`HbnbError::Validation`] when the payload lacks `field`.
pub fn require(payload: &Payload, field: &'static str) -> Result<(), HbnbError> {
    if payload.contains_key(field) {
        Ok(())
    } else {
        Err(ValidationError::MissingField(field).into())
    }
}

/// Parse a raw path id, mapping malformed ids to not-found.
///
/// # Errors
///
/// Returns [`HbnbError::NotFound`] when `raw` is not a valid id.
pub fn parse_id<R: Record>(raw: &str) -> Result<R::Id, HbnbError> {
    R::Id::from_str(raw).map_err(|_| NotFoundError::new(R::KIND, raw).into())
}

/// Build a new record from a client payload.
///
/// Client-chosen ids and timestamps are dropped; `parents` (taken from the
/// request path) override any parent ids in the payload.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAttribute`] when a schema field has the
/// wrong shape.
pub fn build<R: Record>(
    mut payload: Payload,
    parents: impl IntoIterator<Item = (&'static str, String)>,
) -> Result<R, HbnbError> {
    for key in BASE_PROTECTED {
        payload.remove(*key);
    }
    for (key, value) in parents {
        payload.insert(key.to_string(), Value::String(value));
    }

    let ts = Value::String(crate::time::format(now()));
    payload.insert("id".to_string(), Value::String(R::Id::generate().to_string()));
    payload.insert("created_at".to_string(), ts.clone());
    payload.insert("updated_at".to_string(), ts);

    from_payload(payload)
}

/// Merge a partial update into `record`, returning the updated copy.
///
/// Protected keys are silently ignored; unknown keys become extra attributes.
/// `updated_at` is refreshed.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAttribute`] when a schema field would get
/// a value of the wrong shape.
pub fn patch<R: Record>(record: &R, payload: Payload) -> Result<R, HbnbError> {
    let mut current = to_payload(record)?;
    for (key, value) in payload {
        if !is_protected::<R>(&key) {
            current.insert(key, value);
        }
    }
    current.insert(
        "updated_at".to_string(),
        Value::String(crate::time::format(now())),
    );

    from_payload(current)
}

fn to_payload<T: Serialize>(value: &T) -> Result<Payload, HbnbError> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .map_err(HbnbError::Serialization)
}

fn from_payload<R: Record>(payload: Payload) -> Result<R, HbnbError> {
    serde_json::from_value(Value::Object(payload))
        .map_err(|err| ValidationError::InvalidAttribute(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::id::StateId;
    use crate::state::State;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_build_record_with_server_assigned_identity() {
        let state: State = build(payload(json!({"name": "California"})), []).unwrap();
        assert_eq!(state.name, "California");
        assert_eq!(state.created_at, state.updated_at);
    }

    #[test]
    fn should_ignore_client_chosen_id_when_building() {
        let forced = StateId::new();
        let state: State = build(
            payload(json!({"name": "Nevada", "id": forced.to_string(), "__class__": "Foo"})),
            [],
        )
        .unwrap();
        assert_ne!(state.id, forced);
        assert!(!state.extra.contains_key("__class__"));
    }

    #[test]
    fn should_keep_unknown_keys_as_extra_attributes() {
        let state: State = build(payload(json!({"name": "Utah", "motto": "Industry"})), []).unwrap();
        assert_eq!(state.extra.get("motto"), Some(&json!("Industry")));
    }

    #[test]
    fn should_override_parent_from_path_when_building() {
        let state_id = StateId::new();
        let city: City = build(
            payload(json!({"name": "Reno", "state_id": StateId::new().to_string()})),
            [("state_id", state_id.to_string())],
        )
        .unwrap();
        assert_eq!(city.state_id, state_id);
    }

    #[test]
    fn should_reject_wrongly_typed_field_when_building() {
        let result: Result<State, _> = build(payload(json!({"name": 42})), []);
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::InvalidAttribute(_)))
        ));
    }

    #[test]
    fn should_ignore_protected_keys_when_patching() {
        let state = State::new("Texas");
        let patched = patch(
            &state,
            payload(json!({
                "id": StateId::new().to_string(),
                "created_at": "2000-01-01T00:00:00Z",
                "updated_at": "2000-01-01T00:00:00Z",
                "name": "Lone Star",
            })),
        )
        .unwrap();

        assert_eq!(patched.id, state.id);
        assert_eq!(patched.created_at, state.created_at);
        assert!(patched.updated_at >= state.updated_at);
        assert_eq!(patched.name, "Lone Star");
    }

    #[test]
    fn should_ignore_kind_specific_protected_keys_when_patching() {
        let city = City::new(StateId::new(), "Austin");
        let patched = patch(
            &city,
            payload(json!({"state_id": StateId::new().to_string()})),
        )
        .unwrap();
        assert_eq!(patched.state_id, city.state_id);
    }

    #[test]
    fn should_add_class_name_to_dict() {
        let dict = State::new("Ohio").to_dict().unwrap();
        assert_eq!(dict.get("__class__"), Some(&json!("State")));
        assert_eq!(dict.get("name"), Some(&json!("Ohio")));
    }

    #[test]
    fn should_report_missing_field() {
        let result = require(&payload(json!({"other": 1})), "name");
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("name")))
        ));
    }

    #[test]
    fn should_map_malformed_id_to_not_found() {
        let result = parse_id::<State>("nope");
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }
}
