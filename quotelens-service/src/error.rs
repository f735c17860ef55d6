use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quotelens_core::{ErrorEnvelope, QuotelensError};

pub struct AppError {
    pub status: StatusCode,
    pub body: ErrorEnvelope,
}

impl AppError {
    pub fn bad_request(code: &str, msg: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorEnvelope::new(code, msg.to_string(), "Fix the request and retry"),
        }
    }

    pub fn bad_gateway(body: ErrorEnvelope) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            body,
        }
    }

    pub fn internal(msg: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorEnvelope::internal(&msg.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self.body)).into_response()
    }
}

impl From<QuotelensError> for AppError {
    fn from(err: QuotelensError) -> Self {
        match err {
            QuotelensError::UriFormat(_) => AppError::bad_request("uri_format", err),
            QuotelensError::BackendError {
                code,
                message,
                hint,
            } => AppError::bad_gateway(ErrorEnvelope::new(code, message, hint)),
            _ => AppError::internal(err),
        }
    }
}
