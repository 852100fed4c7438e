use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Error drawing chart {0}")]
    Chart(#[from] anyhow::Error),
    #[error("Internal HTTP Error {0}")]
    AxumError(#[from] axum::http::Error),
    #[error("Static file not found {0}")]
    StaticFileNotFound(String),
}

impl WebError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            WebError::StaticFileNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Error returned {self:?}");
        (self.as_status_code(), format!("{self}")).into_response()
    }
}
