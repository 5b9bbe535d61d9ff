//! JSON REST handlers for cities, nested under states.

use axum::extract::{Path, State};

use hbnb_app::ports::Storage;
use hbnb_domain::city::City;
use hbnb_domain::record::parse_id;
use hbnb_domain::state::State as StateRecord;

use super::response::{DeleteResponse, ListResponse, RecordResponse};
use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::state::AppState;

/// `GET /api/v1/states/{state_id}/cities`
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Path(state_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let state_id = parse_id::<StateRecord>(&state_id)?;
    let cities = state.city_service.list_cities(state_id).await?;
    Ok(ListResponse::from_records(&cities)?)
}

/// `GET /api/v1/cities/{city_id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<City>(&id)?;
    let city = state.city_service.get_city(id).await?;
    Ok(RecordResponse::ok(&city)?)
}

/// `POST /api/v1/states/{state_id}/cities`
pub async fn create<S>(
    State(state): State<AppState<S>>,
    Path(state_id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let state_id = parse_id::<StateRecord>(&state_id)?;
    let created = state
        .city_service
        .create_city(state_id, payload.into_body())
        .await?;
    Ok(RecordResponse::created(&created)?)
}

/// `PUT /api/v1/cities/{city_id}`
pub async fn update<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<City>(&id)?;
    let updated = state
        .city_service
        .update_city(id, payload.into_body())
        .await?;
    Ok(RecordResponse::ok(&updated)?)
}

/// `DELETE /api/v1/cities/{city_id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<City>(&id)?;
    state.city_service.delete_city(id).await?;
    Ok(DeleteResponse::Deleted)
}
