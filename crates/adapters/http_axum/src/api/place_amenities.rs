//! JSON REST handlers for the links between places and amenities.

use axum::extract::{Path, State};

use hbnb_app::ports::Storage;
use hbnb_app::services::place_amenity_service::Link;
use hbnb_domain::amenity::Amenity;
use hbnb_domain::place::Place;
use hbnb_domain::record::parse_id;

use super::response::{DeleteResponse, ListResponse, RecordResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/v1/places/{place_id}/amenities`
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let place_id = parse_id::<Place>(&place_id)?;
    let amenities = state
        .place_amenity_service
        .list_amenities(place_id)
        .await?;
    Ok(ListResponse::from_records(&amenities)?)
}

/// `POST /api/v1/places/{place_id}/amenities/{amenity_id}`
///
/// `201` when the link is new, `200` when it already existed.
pub async fn link<S>(
    State(state): State<AppState<S>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let place_id = parse_id::<Place>(&place_id)?;
    let amenity_id = parse_id::<Amenity>(&amenity_id)?;
    let response = match state
        .place_amenity_service
        .link_amenity(place_id, amenity_id)
        .await?
    {
        Link::Created(amenity) => RecordResponse::created(&amenity)?,
        Link::Existing(amenity) => RecordResponse::ok(&amenity)?,
    };
    Ok(response)
}

/// `DELETE /api/v1/places/{place_id}/amenities/{amenity_id}`
pub async fn unlink<S>(
    State(state): State<AppState<S>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + 'static,
{
    let place_id = parse_id::<Place>(&place_id)?;
    let amenity_id = parse_id::<Amenity>(&amenity_id)?;
    state
        .place_amenity_service
        .unlink_amenity(place_id, amenity_id)
        .await?;
    Ok(DeleteResponse::Deleted)
}
