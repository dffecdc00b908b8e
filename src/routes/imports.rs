pub use crate::{
    error::{ApiError, ApiResult},
    likes::LikeState,
    session::visitor_id,
    startup::AppState,
    store::{Article, ArticleFilter},
};

pub use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
pub use axum_sessions::extractors::WritableSession;
pub use serde::{Deserialize, Serialize};
