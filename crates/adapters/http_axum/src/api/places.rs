//! JSON REST handlers for places, nested under cities, and place search.

use axum::extract::{Path, State};

use hbnb_app::ports::Storage;
use hbnb_domain::city::City;
use hbnb_domain::place::Place;
use hbnb_domain::record::parse_id;

use super::response::{DeleteResponse, ListResponse, RecordResponse};
use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::state::AppState;

/// `GET /api/v1/cities/{city_id}/places`
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Path(city_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let city_id = parse_id::<City>(&city_id)?;
    let places = state.place_service.list_places(city_id).await?;
    Ok(ListResponse::from_records(&places)?)
}

/// `GET /api/v1/places/{place_id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Place>(&id)?;
    let place = state.place_service.get_place(id).await?;
    Ok(RecordResponse::ok(&place)?)
}

/// `POST /api/v1/cities/{city_id}/places`
///
/// An unknown city is reported before the body is looked at.
pub async fn create<S>(
    State(state): State<AppState<S>>,
    Path(city_id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let city_id = parse_id::<City>(&city_id)?;
    let created = state
        .place_service
        .create_place(city_id, payload.into_body())
        .await?;
    Ok(RecordResponse::created(&created)?)
}

/// `PUT /api/v1/places/{place_id}`
pub async fn update<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Place>(&id)?;
    let updated = state
        .place_service
        .update_place(id, payload.into_body())
        .await?;
    Ok(RecordResponse::ok(&updated)?)
}

/// `DELETE /api/v1/places/{place_id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Place>(&id)?;
    state.place_service.delete_place(id).await?;
    Ok(DeleteResponse::Deleted)
}

/// `POST /api/v1/places_search`
pub async fn search<S>(
    State(state): State<AppState<S>>,
    payload: JsonPayload,
) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let filter = payload.into_filter()?;
    let places = state.place_service.search_places(filter).await?;
    Ok(ListResponse::from_records(&places)?)
}
