use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{store::StoreError, templates};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, Html(templates::not_found_page())).into_response()
            }
            AppError::Store(err @ (StoreError::DuplicateUser | StoreError::DuplicateMovie)) => {
                (StatusCode::CONFLICT, Html(templates::error_page(err.to_string()))).into_response()
            }
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(templates::error_page(err.to_string())))
                    .into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
