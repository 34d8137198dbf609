//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard API response wrapper.
///
/// Success payloads are wrapped in a `data` field; errors are rendered
/// by `AppError` and never pass through this type.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wrapped_in_data() {
        let response = ApiResponse::ok(vec!["a", "b"]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"][0], "a");
        assert_eq!(json["data"][1], "b");
    }
}
