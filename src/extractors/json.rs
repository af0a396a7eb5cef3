//! JSON body extractor whose rejections use the error envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub const UNSUPPORTED_MEDIA_TYPE: &str = "Content-Type must be application/json";
pub const INVALID_JSON: &str = "Invalid JSON body.";
pub const BODY_TOO_LARGE: &str = "Request body is too large.";

/// Raw JSON body. Shape checks are left to the validator.
#[derive(Clone, Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Err(AppError::UnsupportedMediaType(UNSUPPORTED_MEDIA_TYPE.into()))
            }
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge(BODY_TOO_LARGE.into()))
            }
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "rejected request body");
                Err(AppError::BadRequest(INVALID_JSON.into()))
            }
        }
    }
}
