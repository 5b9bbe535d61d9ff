//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HbnbError`]
//! via `From`.

use crate::kind::Kind;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum HbnbError {
    /// The request payload was rejected.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// A record could not be turned into its JSON form.
    #[error("serialization error")]
    Serialization(#[source] serde_json::Error),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Payload problems, reported verbatim to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Body absent, unparseable, not an object, or empty.
    #[error("Not a JSON")]
    NotAJson,

    /// A required field is absent from the payload.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// A known field carries a value of the wrong shape.
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
}

/// A lookup by id did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: Kind,
    pub id: String,
}

impl NotFoundError {
    /// Build a not-found error for the given kind and raw id.
    #[must_use]
    pub fn new(kind: Kind, id: impl ToString) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_missing_field_message() {
        assert_eq!(
            ValidationError::MissingField("name").to_string(),
            "Missing name"
        );
    }

    #[test]
    fn should_render_not_a_json_message() {
        assert_eq!(ValidationError::NotAJson.to_string(), "Not a JSON");
    }

    #[test]
    fn should_convert_not_found_into_top_level_error() {
        let err: HbnbError = NotFoundError::new(Kind::City, "abc").into();
        assert!(matches!(err, HbnbError::NotFound(ref nf) if nf.kind == Kind::City));
        assert_eq!(
            NotFoundError::new(Kind::City, "abc").to_string(),
            "City abc not found"
        );
    }
}
