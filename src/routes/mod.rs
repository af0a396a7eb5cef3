//! Router assembly.

mod producer;
mod status;

pub use producer::producer_routes;
pub use status::status_routes;

use crate::handlers::fallback::not_found;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";

/// Bodies above this size fail extraction with 413.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: status routes at the root, producer CRUD under `/api/v1`.
/// Unknown paths fall through to a 404 in the error envelope; nested routers inherit it.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(status_routes(state.clone()))
        .nest(API_PREFIX, producer_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
