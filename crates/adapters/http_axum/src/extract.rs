//! Request body extraction.
//!
//! Handlers never reject a request on body shape alone: resource services
//! decide what an absent or malformed body means, so the extractor only
//! classifies what arrived.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

use hbnb_domain::error::{HbnbError, ValidationError};
use hbnb_domain::record::Payload;

/// A request body, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonPayload {
    /// No body, or a JSON `null`.
    Absent,
    /// A body that is not a JSON object, or not sent as JSON.
    Malformed,
    /// A JSON object.
    Object(Payload),
}

impl JsonPayload {
    /// The object, if one was sent.
    #[must_use]
    pub fn into_body(self) -> Option<Payload> {
        match self {
            Self::Object(payload) => Some(payload),
            Self::Absent | Self::Malformed => None,
        }
    }

    /// The object for a filter body where absence is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAJson`] for a malformed body.
    pub fn into_filter(self) -> Result<Option<Payload>, HbnbError> {
        match self {
            Self::Object(payload) => Ok(Some(payload)),
            Self::Absent => Ok(None),
            Self::Malformed => Err(ValidationError::NotAJson.into()),
        }
    }

    fn classify(headers: &HeaderMap, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Absent;
        }
        if !is_json(headers) {
            return Self::Malformed;
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(payload)) => Self::Object(payload),
            Ok(Value::Null) => Self::Absent,
            Ok(_) | Err(_) => Self::Malformed,
        }
    }
}

/// `application/json` or any `application/*+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(Self::classify(&headers, &bytes)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "unreadable request body");
                Ok(Self::Malformed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn should_classify_object_when_json_content_type() {
        let payload = JsonPayload::classify(&headers("application/json"), br#"{"name":"A"}"#);
        assert!(matches!(payload, JsonPayload::Object(map) if map["name"] == "A"));
    }

    #[test]
    fn should_accept_suffixed_json_content_type() {
        let payload = JsonPayload::classify(
            &headers("application/vnd.api+json; charset=utf-8"),
            b"{}",
        );
        assert_eq!(payload, JsonPayload::Object(Payload::new()));
    }

    #[test]
    fn should_classify_absent_when_body_empty() {
        assert_eq!(
            JsonPayload::classify(&HeaderMap::new(), b""),
            JsonPayload::Absent
        );
    }

    #[test]
    fn should_classify_absent_when_body_is_null() {
        assert_eq!(
            JsonPayload::classify(&headers("application/json"), b"null"),
            JsonPayload::Absent
        );
    }

    #[test]
    fn should_classify_malformed_when_not_an_object() {
        assert_eq!(
            JsonPayload::classify(&headers("application/json"), b"[1, 2]"),
            JsonPayload::Malformed
        );
        assert_eq!(
            JsonPayload::classify(&headers("application/json"), b"{nope"),
            JsonPayload::Malformed
        );
    }

    #[test]
    fn should_classify_malformed_when_content_type_not_json() {
        assert_eq!(
            JsonPayload::classify(&headers("text/plain"), br#"{"name":"A"}"#),
            JsonPayload::Malformed
        );
    }

    #[test]
    fn should_reject_malformed_filter() {
        assert!(matches!(
            JsonPayload::Malformed.into_filter(),
            Err(HbnbError::Validation(ValidationError::NotAJson))
        ));
        assert_eq!(JsonPayload::Absent.into_filter().unwrap(), None);
    }
}
