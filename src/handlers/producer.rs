//! Producer CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::query::ListQuery;
use crate::response::{success_many, success_one, success_one_created};
use crate::service::ProducerValidator;
use crate::state::AppState;
use axum::extract::{FromRequest, Path, Query, Request, State};
use axum::response::IntoResponse;
use serde_json::Value;

/// Path ids that are not integers cannot name a row.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.parse().map_err(|_| AppError::producer_not_found(id_str))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let query = ListQuery::from_params(&params);
    let rows = state.store.list(&query).await?;
    let data: Vec<Value> = rows.iter().map(|p| p.project(&query.fields)).collect();
    Ok(success_many(data))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::producer_not_found(id))?;
    Ok(success_one(row))
}

pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> Result<impl IntoResponse, AppError> {
    let body = ProducerValidator::for_today().validate(&body)?;
    let row = state.store.create(&body).await?;
    Ok(success_one_created(row))
}

/// The row is looked up before the body is read, so a missing id is 404 whatever the payload.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if state.store.get(id).await?.is_none() {
        return Err(AppError::producer_not_found(id));
    }
    let JsonBody(body) = JsonBody::from_request(request, &state).await?;
    let body = ProducerValidator::for_today().validate(&body)?;
    let row = state
        .store
        .update(id, &body)
        .await?
        .ok_or_else(|| AppError::producer_not_found(id))?;
    tracing::info!(id, "producer updated");
    Ok(success_one(row))
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.store.delete(id).await? {
        return Err(AppError::producer_not_found(id));
    }
    tracing::info!(id, "producer deleted");
    Ok(success_one(format!("Producer with id {} has been deleted", id)))
}
