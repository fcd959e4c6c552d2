//! Request extractors with rejections mapped onto [`AppError`].

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// JSON object body extractor whose rejection is a 400 `{"error": ...}` response.
///
/// The body is decoded whatever `Content-Type` says. Anything other than a
/// JSON object (arrays, scalars, `null`), syntax errors and type mismatches
/// are rejected before the handler body runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T> ApiJson<T>
where
    T: DeserializeOwned,
{
    /// Decode a request body that must hold a single JSON object.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let object: Map<String, Value> =
            serde_json::from_slice(bytes).map_err(|err| AppError::bad_request(err.to_string()))?;
        serde_json::from_value(Value::Object(object))
            .map(Self)
            .map_err(|err| AppError::bad_request(err.to_string()))
    }
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Self::from_bytes(&bytes)
    }
}
