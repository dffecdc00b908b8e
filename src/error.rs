use axum::response::{IntoResponse, Response};
use hyper::StatusCode;

use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Entry not found")]
    EntryNotFound,

    #[error("Bad request")]
    BadRequest,

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let trace_message = match &self {
            Self::UnexpectedError(e) => format!("{e:#}"),
            _ => self.to_string(),
        };
        tracing::error!("{}", trace_message);

        match &self {
            Self::EntryNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::StoreError(_e) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnexpectedError(_e) => StatusCode::INTERNAL_SERVER_ERROR,
        }
        .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
