//! JSON REST handlers for states.

use axum::extract::{Path, State};

use hbnb_app::ports::Storage;
use hbnb_domain::record::parse_id;
use hbnb_domain::state::State as StateRecord;

use super::response::{DeleteResponse, ListResponse, RecordResponse};
use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::state::AppState;

/// `GET /api/v1/states`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: Storage + 'static,
{
    let states = state.state_service.list_states().await?;
    Ok(ListResponse::from_records(&states)?)
}

/// `GET /api/v1/states/{state_id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<StateRecord>(&id)?;
    let found = state.state_service.get_state(id).await?;
    Ok(RecordResponse::ok(&found)?)
}

/// `POST /api/v1/states`
pub async fn create<S>(
    State(state): State<AppState<S>>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let created = state
        .state_service
        .create_state(payload.into_body())
        .await?;
    Ok(RecordResponse::created(&created)?)
}

/// `PUT /api/v1/states/{state_id}`
pub async fn update<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: JsonPayload,
) -> Result<RecordResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<StateRecord>(&id)?;
    let updated = state
        .state_service
        .update_state(id, payload.into_body())
        .await?;
    Ok(RecordResponse::ok(&updated)?)
}

/// `DELETE /api/v1/states/{state_id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: Storage + 'static,
{
    let id = parse_id::<StateRecord>(&id)?;
    state.state_service.delete_state(id).await?;
    Ok(DeleteResponse::Deleted)
}
