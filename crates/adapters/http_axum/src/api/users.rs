//! JSON REST handlers for users.

use axum::extract::{Path, State};

use hbnb_app::ports::Storage;
use hbnb_domain::record::parse_id;
use hbnb_domain::user::User;

use super::response::{DeleteResponse, ListResponse, RecordResponse};
use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::state::AppState;

/// `GET /api/v1/users`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let users = state.user_service.list_users().await?;
    Ok(ListResponse::from_records(&users)?)
}

/// `GET /api/v1/users/{user_id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<User>(&id)?;
    let user = state.user_service.get_user(id).await?;
    Ok(RecordResponse::ok(&user)?)
}

/// `POST /api/v1/users`
pub async fn create<S>(
    State(state): State<AppState<S>>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let created = state
        .user_service
        .create_user(payload.into_body())
        .await?;
    Ok(RecordResponse::created(&created)?)
}

/// `PUT /api/v1/users/{user_id}`
pub async fn update<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<User>(&id)?;
    let updated = state
        .user_service
        .update_user(id, payload.into_body())
        .await?;
    Ok(RecordResponse::ok(&updated)?)
}

/// `DELETE /api/v1/users/{user_id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<User>(&id)?;
    state.user_service.delete_user(id).await?;
    Ok(DeleteResponse::Deleted)
}
