//! Response shapes shared by the resource handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hbnb_domain::error::HbnbError;
use hbnb_domain::record::{Payload, Record};

/// Possible responses from a list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Payload>>),
}

impl ListResponse {
    /// Serialize records into their dictionary form.
    pub fn from_records<R: Record>(records: &[R]) -> Result<Self, HbnbError> {
        let dicts = records
            .iter()
            .map(Record::to_dict)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Ok(Json(dicts)))
    }
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from an endpoint returning a single record.
pub enum RecordResponse {
    Ok(Json<Payload>),
    Created(Json<Payload>),
}

impl RecordResponse {
    pub fn ok<R: Record>(record: &R) -> Result<Self, HbnbError> {
        Ok(Self::Ok(Json(record.to_dict()?)))
    }

    pub fn created<R: Record>(record: &R) -> Result<Self, HbnbError> {
        Ok(Self::Created(Json(record.to_dict()?)))
    }
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from a delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => (StatusCode::OK, Json(json!({}))).into_response(),
        }
    }
}
