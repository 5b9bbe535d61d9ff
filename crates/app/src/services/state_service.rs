//! State service: use-cases for managing states.

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::StateId;
use hbnb_domain::record::{Payload, require};
use hbnb_domain::state::State;

use super::crud;
use crate::ports::Storage;

/// Application service for state CRUD operations.
pub struct StateService<S> {
    storage: S,
}

impl<S: Storage> StateService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List all states.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_states(&self) -> Result<Vec<State>, HbnbError> {
        self.storage.all::<State>().await
    }

    /// Look up a state by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no state with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_state(&self, id: StateId) -> Result<State, HbnbError> {
        crud::fetch(&self.storage, id).await
    }

    /// Create a state from a client payload; `name` is required.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] for an absent body or missing name,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create_state(&self, payload: Option<Payload>) -> Result<State, HbnbError> {
        let payload = crud::body(payload)?;
        require(&payload, "name")?;
        crud::create(&self.storage, payload, []).await
    }

    /// Apply a partial update to a state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the state does not exist,
    /// [`HbnbError::Validation`] for an absent body, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_state(
        &self,
        id: StateId,
        payload: Option<Payload>,
    ) -> Result<State, HbnbError> {
        crud::update(&self.storage, id, payload).await
    }

    /// Delete a state together with its cities (and their places).
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the state does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_state(&self, id: StateId) -> Result<(), HbnbError> {
        crud::remove::<S, State>(&self.storage, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStorage, payload};
    use hbnb_domain::error::ValidationError;
    use serde_json::json;

    fn make_service() -> StateService<MemoryStorage> {
        StateService::new(MemoryStorage::default())
    }

    #[tokio::test]
    async fn should_create_and_fetch_identical_state() {
        let svc = make_service();
        let created = svc
            .create_state(Some(payload(json!({"name": "California"}))))
            .await
            .unwrap();

        let fetched = svc.get_state(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "California");
    }

    #[tokio::test]
    async fn should_reject_create_when_body_missing() {
        let svc = make_service();
        let result = svc.create_state(None).await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::NotAJson))
        ));
    }

    #[tokio::test]
    async fn should_reject_create_when_name_missing() {
        let svc = make_service();
        let result = svc
            .create_state(Some(payload(json!({"motto": "Eureka"}))))
            .await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("name")))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_state_missing() {
        let svc = make_service();
        let result = svc.get_state(StateId::new()).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_states() {
        let svc = make_service();
        svc.create_state(Some(payload(json!({"name": "Oregon"}))))
            .await
            .unwrap();
        svc.create_state(Some(payload(json!({"name": "Maine"}))))
            .await
            .unwrap();

        let all = svc.list_states().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_keep_protected_fields_when_updating() {
        let svc = make_service();
        let created = svc
            .create_state(Some(payload(json!({"name": "Arizona"}))))
            .await
            .unwrap();

        let updated = svc
            .update_state(
                created.id,
                Some(payload(json!({
                    "id": StateId::new().to_string(),
                    "created_at": "1999-01-01T00:00:00Z",
                    "name": "Grand Canyon State",
                    "capital": "Phoenix",
                }))),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Grand Canyon State");
        assert_eq!(updated.extra["capital"], "Phoenix");
        assert_eq!(svc.get_state(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn should_check_existence_before_body_when_updating() {
        let svc = make_service();
        let result = svc.update_state(StateId::new(), None).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_state() {
        let svc = make_service();
        let created = svc
            .create_state(Some(payload(json!({"name": "Idaho"}))))
            .await
            .unwrap();

        svc.delete_state(created.id).await.unwrap();

        let result = svc.get_state(created.id).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
        let again = svc.delete_state(created.id).await;
        assert!(matches!(again, Err(HbnbError::NotFound(_))));
    }
}
