// --- File: crates/warrantify_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, WarrantifyError};

// Include the client module
pub mod client;

/// Extension trait for WarrantifyError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for WarrantifyError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_message = self.to_string();

        let body = Json(json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for WarrantifyError to make it easier to use in Axum handlers.
impl IntoResponse for WarrantifyError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// A utility function to convert a Result<T, WarrantifyError> to a Result<Json<T>, Response>.
/// This is useful for Axum handlers that return a JSON response.
pub fn handle_json_result<T>(result: Result<T, WarrantifyError>) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
{
    result.map(Json).map_err(|err| err.into_response())
}

/// A utility function to convert a Result<T, E> to a Result<Json<T>, Response> using a custom error mapper.
/// This is useful for Axum handlers that need to convert domain-specific errors to HTTP responses.
pub fn map_json_error<T, E, F>(result: Result<T, E>, f: F) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
    F: FnOnce(E) -> WarrantifyError,
{
    result.map(Json).map_err(|err| f(err).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::conflict;

    #[test]
    fn conflict_renders_as_409() {
        let response = conflict("run in flight").into_http_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn handle_json_result_maps_errors_to_responses() {
        let ok = handle_json_result(Ok("fine"));
        assert!(ok.is_ok());

        let err = handle_json_result::<&str>(Err(conflict("run in flight")));
        assert_eq!(err.unwrap_err().status(), StatusCode::CONFLICT);
    }
}
