//! JSON REST handlers for reviews, nested under places.

use axum::extract::{Path, State};

use hbnb_app::ports::Storage;
use hbnb_domain::place::Place;
use hbnb_domain::record::parse_id;
use hbnb_domain::review::Review;

use super::response::{DeleteResponse, ListResponse, RecordResponse};
use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::state::AppState;

/// `GET /api/v1/places/{place_id}/reviews`
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let place_id = parse_id::<Place>(&place_id)?;
    let reviews = state.review_service.list_reviews(place_id).await?;
    Ok(ListResponse::from_records(&reviews)?)
}

/// `GET /api/v1/reviews/{review_id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Review>(&id)?;
    let review = state.review_service.get_review(id).await?;
    Ok(RecordResponse::ok(&review)?)
}

/// `POST /api/v1/places/{place_id}/reviews`
pub async fn create<S>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let place_id = parse_id::<Place>(&place_id)?;
    let created = state
        .review_service
        .create_review(place_id, payload.into_body())
        .await?;
    Ok(RecordResponse::created(&created)?)
}

/// `PUT /api/v1/reviews/{review_id}`
pub async fn update<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Review>(&id)?;
    let updated = state
        .review_service
        .update_review(id, payload.into_body())
        .await?;
    Ok(RecordResponse::ok(&updated)?)
}

/// `DELETE /api/v1/reviews/{review_id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<Review>(&id)?;
    state.review_service.delete_review(id).await?;
    Ok(DeleteResponse::Deleted)
}
