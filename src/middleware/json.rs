use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the failure envelope.
///
/// The body is parsed whatever the content type, and an empty body reads
/// as `{}`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large(rejection.body_text())
            } else {
                ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
            }
        })?;

        let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        Json::<T>::from_bytes(bytes)
            .map(|Json(value)| ApiJson(value))
            .map_err(|rejection| ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text())))
    }
}
