//! Axum router assembly.

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use hbnb_app::ports::Storage;

use crate::state::AppState;

/// Build the top-level service.
///
/// Nests the API routes under `/api/v1`, answers unmatched routes with a JSON
/// 404 and includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level. Trailing slashes are trimmed before routing, so
/// `/api/v1/states/` reaches the same handler as `/api/v1/states`.
pub fn build<S>(state: AppState<S>) -> NormalizePath<Router>
where
    S: Storage + 'static,
{
    let router = Router::new()
        .nest("/api/v1", crate::api::routes())
        .fallback(crate::error::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
