//! User: owner of places and author of reviews.

use serde::{Deserialize, Serialize};

use crate::error::HbnbError;
use crate::id::UserId;
use crate::kind::Kind;
use crate::record::{Payload, Record};
use crate::time::{Timestamp, now};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Payload,
}

impl User {
    /// Create a user with fresh identity.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: UserId::new(),
            created_at: ts,
            updated_at: ts,
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
            extra: Payload::new(),
        }
    }
}

impl Record for User {
    type Id = UserId;
    const KIND: Kind = Kind::User;
    const PROTECTED: &'static [&'static str] = &["email"];

    fn id(&self) -> UserId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The password never leaves the server.
    fn to_dict(&self) -> Result<Payload, HbnbError> {
        let mut dict: Payload = serde_json::to_value(self)
            .and_then(serde_json::from_value)
            .map_err(HbnbError::Serialization)?;
        dict.remove("password");
        dict.insert(
            "__class__".to_string(),
            serde_json::Value::String(Self::KIND.class_name().to_string()),
        );
        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_hide_password_from_dict() {
        let user = User::new("betty@hbnb.io", "pwd");
        let dict = user.to_dict().unwrap();
        assert!(!dict.contains_key("password"));
        assert_eq!(dict["email"], "betty@hbnb.io");
        assert_eq!(dict["__class__"], "User");
    }

    #[test]
    fn should_keep_password_in_storage_form() {
        let user = User::new("betty@hbnb.io", "pwd");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["password"], "pwd");
    }
}
