//! User service: use-cases for managing users.

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::UserId;
use hbnb_domain::record::{Payload, require};
use hbnb_domain::user::User;

use super::crud;
use crate::ports::Storage;

/// Application service for user CRUD operations.
pub struct UserService<S> {
    storage: S,
}

impl<S: Storage> UserService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_users(&self) -> Result<Vec<User>, HbnbError> {
        self.storage.all::<User>().await
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no user with `id` exists,
    /// or a storage error from the backend.
    pub async fn get_user(&self, id: UserId) -> Result<User, HbnbError> {
        crud::fetch(&self.storage, id).await
    }

    /// Create a user; `email` then `password` are required.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] for an absent body or a missing
    /// field, or a storage error from the backend.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create_user(&self, payload: Option<Payload>) -> Result<User, HbnbError> {
        let payload = crud::body(payload)?;
        require(&payload, "email")?;
        require(&payload, "password")?;
        crud::create(&self.storage, payload, []).await
    }

    /// Apply a partial update to a user. The email cannot be changed.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the user does not exist,
    /// [`HbnbError::Validation`] for an absent body, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_user(
        &self,
        id: UserId,
        payload: Option<Payload>,
    ) -> Result<User, HbnbError> {
        crud::update(&self.storage, id, payload).await
    }

    /// Delete a user together with their places and reviews.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] if the user does not exist,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), HbnbError> {
        crud::remove::<S, User>(&self.storage, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStorage, payload};
    use hbnb_domain::error::ValidationError;
    use serde_json::json;

    fn make_service() -> UserService<MemoryStorage> {
        UserService::new(MemoryStorage::default())
    }

    #[tokio::test]
    async fn should_require_email_before_password() {
        let svc = make_service();
        let result = svc.create_user(Some(payload(json!({"first_name": "Bob"})))).await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("email")))
        ));

        let result = svc
            .create_user(Some(payload(json!({"email": "bob@hbnb.io"}))))
            .await;
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("password")))
        ));
    }

    #[tokio::test]
    async fn should_keep_email_when_updating() {
        let svc = make_service();
        let user = svc
            .create_user(Some(payload(
                json!({"email": "bob@hbnb.io", "password": "pw"}),
            )))
            .await
            .unwrap();

        let updated = svc
            .update_user(
                user.id,
                Some(payload(
                    json!({"email": "evil@hbnb.io", "first_name": "Bob"}),
                )),
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "bob@hbnb.io");
        assert_eq!(updated.first_name.as_deref(), Some("Bob"));
    }

    #[tokio::test]
    async fn should_delete_user() {
        let svc = make_service();
        let user = svc
            .create_user(Some(payload(
                json!({"email": "gone@hbnb.io", "password": "pw"}),
            )))
            .await
            .unwrap();

        svc.delete_user(user.id).await.unwrap();
        assert!(matches!(
            svc.get_user(user.id).await,
            Err(HbnbError::NotFound(_))
        ));
        assert!(svc.list_users().await.unwrap().is_empty());
    }
}
