use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::accounts::StoreError;
use crate::auth::dto::MessageResponse;
use crate::validation::MissingFields;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    #[error("invalid request body: {0}")]
    BadBody(String),

    #[error("api key is missing")]
    MissingApiKey,

    #[error("access denied")]
    AccessDenied,

    /// A business outcome with a non-2xx status.
    #[error("{1}")]
    Rejected(StatusCode, &'static str),

    #[error("internal error")]
    Internal(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingFields(missing) => return missing.into_response(),
            ApiError::BadBody(detail) => {
                warn!(%detail, "request body rejected");
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST_BODY")
            }
            ApiError::MissingApiKey => (StatusCode::BAD_REQUEST, "API_KEY_IS_MISSING"),
            ApiError::AccessDenied => (StatusCode::UNAUTHORIZED, "ACCESS_DENIED"),
            ApiError::Rejected(status, code) => (status, code),
            ApiError::Internal(e) => {
                error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        (status, Json(MessageResponse { message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
