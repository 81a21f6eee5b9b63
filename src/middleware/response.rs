use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Success envelope: `{ success: true, message, data }`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            data,
            message: message.into(),
            status_code: None,
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(message: impl Into<String>, data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a 201 Created response
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(message, data, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": "Failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        let envelope = json!({
            "success": true,
            "message": self.message,
            "data": data_value
        });

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_uses_201() {
        let response = ApiResponse::created("made", json!({ "id": 1 })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn success_defaults_to_200() {
        let response = ApiResponse::success("ok", Option::<u8>::None).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
