use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use premia_common::error::PremiaError;

pub struct ApiError(pub PremiaError);

impl From<PremiaError> for ApiError {
    fn from(err: PremiaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Classifier and database failures keep a 200 status with an `error`
        // payload: the deployed frontend branches on the field, not the
        // status code. Only the lookup miss is a real 404. Diagnostic detail
        // stays in the logs.
        let (status, message) = match &self.0 {
            PremiaError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            PremiaError::Classifier(detail) => {
                tracing::error!(detail = %detail, "image analysis failed");
                (StatusCode::OK, "Failed to analyze image".to_owned())
            }
            PremiaError::Database(detail) => {
                tracing::error!(detail = %detail, "rating lookup failed");
                (StatusCode::OK, "something went wrong...".to_owned())
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
