//! Service status: liveness, storage readiness, build info.

use crate::handlers::fallback::method_not_allowed;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

const UP: &str = "ok";

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
}

/// `database` names the storage check even when the memory backend is in use.
#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness { status: UP })
}

/// 503 while the store cannot answer a ping.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Readiness {
                status: UP,
                database: UP,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "producer store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health, GET /ready, GET /version.
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness).fallback(method_not_allowed))
        .route("/ready", get(readiness).fallback(method_not_allowed))
        .route("/version", get(build_info).fallback(method_not_allowed))
        .with_state(state)
}
