use std::num::ParseIntError;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::db::RepoError;

/// Everything a handler can fail with. None of it is shown to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid post id: {0}")]
    Parse(#[from] ParseIntError),
    #[error("only method POST is allowed for {route}")]
    MethodNotAllowed { route: &'static str },
    #[error(transparent)]
    Storage(#[from] RepoError),
    #[error("invalid form data: {0}")]
    Form(#[from] FormRejection),
    #[error("invalid query string: {0}")]
    Query(#[from] QueryRejection),
    #[error("invalid multipart form: {0}")]
    Multipart(#[from] MultipartRejection),
    #[error("unreadable multipart field: {0}")]
    MultipartField(#[from] MultipartError),
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Convert handler failures to HTTP responses
///
/// Every failure is logged and answered with the same plain-text 500, so the
/// cause only ever shows up in the logs.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let message = format!(
            "{} {}\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );

        (status, message).into_response()
    }
}
