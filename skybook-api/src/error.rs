use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skybook_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    Core(CoreError),
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Core(err) => match err {
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                CoreError::Conflict(_) | CoreError::Unavailable(_) => {
                    (StatusCode::CONFLICT, err.to_string())
                }
                CoreError::InvalidState { .. } => (StatusCode::CONFLICT, err.to_string()),
                CoreError::ValidationFailed(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::PaymentFailed(_) => (StatusCode::PAYMENT_REQUIRED, err.to_string()),
                CoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
                CoreError::StorageCorrupt { .. } | CoreError::Storage(_) => {
                    tracing::error!("Internal Server Error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
            },
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}
