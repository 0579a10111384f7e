//! Server error types and response handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::component::RenderError;
use crate::components::flow::GenerateError;

/// Errors that can occur while building a response
#[derive(Debug)]
pub enum AppError {
    /// The request asked for something that does not exist
    BadRequest(String),
    /// Rendering failed (missing template, template error, misconfiguration)
    Render(String),
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Render(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::error!("Request failed: {} - {}", status, message);

        (status, message).into_response()
    }
}
