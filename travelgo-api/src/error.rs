use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use travelgo_booking::BookingError;
use travelgo_core::StoreError;

/// Request-level failure taxonomy. Auth and draft failures answer with the
/// portal's redirect semantics; everything else maps to a plain status code
/// with a JSON error body.
#[derive(Debug)]
pub enum AppError {
    Unauthenticated,
    Unauthorized,
    NoDraft,
    InvalidCredentials,
    Validation(String),
    NotFound(String),
    Conflict(String),
    Store(StoreError),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated | AppError::Unauthorized => {
                Redirect::to("/login").into_response()
            }
            AppError::NoDraft => Redirect::to("/").into_response(),
            AppError::InvalidCredentials => {
                error_body(StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::Validation(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => error_body(StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => error_body(StatusCode::CONFLICT, msg),
            AppError::Store(err) => {
                tracing::error!("store failure: {}", err);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("internal error: {}", err);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    let body = Json(json!({
        "error": message,
    }));
    (status, body).into_response()
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Unauthenticated => Self::Unauthenticated,
            BookingError::NoDraft => Self::NoDraft,
            BookingError::Store(err) => Self::Store(err),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
