//! Error handling

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::models::DatasetError;
use crate::pages;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The upload was malformed before it ever reached the CSV parser.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidUpload(_) | AppError::Dataset(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Analysis(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::Io(err) => {
                tracing::error!("i/o failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Html(pages::error_page(status, &message))).into_response()
    }
}
