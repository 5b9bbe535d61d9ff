//! Lookup, patch and delete steps shared by every resource service.

use hbnb_domain::error::{HbnbError, NotFoundError, ValidationError};
use hbnb_domain::record::{self, Payload, Record, parse_id};

use crate::ports::Storage;

/// Load a record or fail with not-found.
pub(crate) async fn fetch<S: Storage, R: Record>(storage: &S, id: R::Id) -> Result<R, HbnbError> {
    storage
        .get::<R>(id)
        .await?
        .ok_or_else(|| NotFoundError::new(R::KIND, id).into())
}

/// Unwrap a request body, treating an absent or empty object as "Not a JSON".
pub(crate) fn body(payload: Option<Payload>) -> Result<Payload, HbnbError> {
    match payload {
        Some(payload) if !payload.is_empty() => Ok(payload),
        _ => Err(ValidationError::NotAJson.into()),
    }
}

/// Resolve the record a payload key points at, e.g. the `user_id` of a new
/// place. A value that is not an id string cannot resolve and reports as
/// not-found.
pub(crate) async fn referenced<S: Storage, R: Record>(
    storage: &S,
    payload: &Payload,
    key: &str,
) -> Result<R, HbnbError> {
    let raw = payload
        .get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    let id = parse_id::<R>(raw)?;
    fetch(storage, id).await
}

/// Build a record from the payload and persist it.
pub(crate) async fn create<S: Storage, R: Record>(
    storage: &S,
    payload: Payload,
    parents: impl IntoIterator<Item = (&'static str, String)> + Send,
) -> Result<R, HbnbError> {
    let created: R = record::build(payload, parents)?;
    tracing::debug!(kind = %R::KIND, id = %created.id(), "creating record");
    storage.insert(created).await
}

/// Merge the payload into an existing record and persist it.
///
/// The record is resolved before the body is looked at.
pub(crate) async fn update<S: Storage, R: Record>(
    storage: &S,
    id: R::Id,
    payload: Option<Payload>,
) -> Result<R, HbnbError> {
    let current: R = fetch(storage, id).await?;
    let payload = body(payload)?;
    let updated = record::patch(&current, payload)?;
    storage.update(updated).await
}

/// Delete an existing record.
pub(crate) async fn remove<S: Storage, R: Record>(storage: &S, id: R::Id) -> Result<(), HbnbError> {
    fetch::<S, R>(storage, id).await?;
    storage.delete::<R>(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_reject_absent_body() {
        assert!(matches!(
            body(None),
            Err(HbnbError::Validation(ValidationError::NotAJson))
        ));
    }

    #[test]
    fn should_reject_empty_object() {
        assert!(matches!(
            body(Some(Payload::new())),
            Err(HbnbError::Validation(ValidationError::NotAJson))
        ));
    }

    #[test]
    fn should_accept_non_empty_object() {
        let payload: Payload = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(body(Some(payload.clone())).unwrap(), payload);
    }
}
