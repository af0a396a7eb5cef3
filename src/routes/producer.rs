//! Producer CRUD routes, mounted under `/api/v1`.

use crate::handlers::fallback::method_not_allowed;
use crate::handlers::producer::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn producer_routes(state: AppState) -> Router {
    Router::new()
        .route("/producers", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/producers/:id",
            get(read).put(update).delete(delete_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}
