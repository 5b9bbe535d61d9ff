//! JSON REST handlers for amenities.

use axum::extract::{Path, State};

use hbnb_app::ports::Storage;
use hbnb_domain::amenity::Amenity;
use hbnb_domain::record::parse_id;

use super::response::{DeleteResponse, ListResponse, RecordResponse};
use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::state::AppState;

/// `GET /api/v1/amenities`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let amenities = state.amenity_service.list_amenities().await?;
    Ok(ListResponse::from_records(&amenities)?)
}

/// `GET /api/v1/amenities/{amenity_id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Amenity>(&id)?;
    let amenity = state.amenity_service.get_amenity(id).await?;
    Ok(RecordResponse::ok(&amenity)?)
}

/// `POST /api/v1/amenities`
pub async fn create<S>(
    State(state): State<AppState<S>>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let created = state
        .amenity_service
        .create_amenity(payload.into_body())
        .await?;
    Ok(RecordResponse::created(&created)?)
}

/// `PUT /api/v1/amenities/{amenity_id}`
pub async fn update<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Amenity>(&id)?;
    let updated = state
        .amenity_service
        .update_amenity(id, payload.into_body())
        .await?;
    Ok(RecordResponse::ok(&updated)?)
}

/// `DELETE /api/v1/amenities/{amenity_id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Amenity>(&id)?;
    state.amenity_service.delete_amenity(id).await?;
    Ok(DeleteResponse::Deleted)
}
