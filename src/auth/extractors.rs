use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticates the request by its API key, yielding the owner's user id.
pub struct ApiKeyUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for ApiKeyUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Raw key, or "Bearer <key>"
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ApiError::MissingApiKey)?;
        let api_key = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .unwrap_or(header)
            .trim();

        if !state.accounts.is_valid_api_key(api_key).await? {
            warn!("unknown api key");
            return Err(ApiError::AccessDenied);
        }

        // The key may have been rotated since the check above.
        let user_id = state
            .accounts
            .get_user_id(api_key)
            .await?
            .ok_or(ApiError::AccessDenied)?;

        Ok(ApiKeyUser(user_id))
    }
}
