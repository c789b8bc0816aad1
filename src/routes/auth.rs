use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};

use crate::constants::API_KEY_HEADER;
use crate::error::AppError;
use crate::security::verify_api_key;
use crate::AppState;

/// Proof that the request carried an accepted `x-api-key`
///
/// Add it as a handler argument to gate the route. Extraction fails with
/// `AppError::Unauthorized` when the header is missing, empty, or matches
/// none of the configured key hashes.
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

#[async_trait]
impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| {
                tracing::debug!("Request without API key: {} {}", parts.method, parts.uri);
                AppError::Unauthorized
            })?;

        // Argon2 verification is CPU-bound, keep it off the async workers
        let references = state.config.api_key_hashes.clone();
        let accepted =
            tokio::task::spawn_blocking(move || verify_api_key(&presented, &references)).await?;

        if !accepted {
            tracing::warn!("Rejected API key on {} {}", parts.method, parts.uri);
            return Err(AppError::Unauthorized);
        }

        Ok(ApiKey)
    }
}

/// Method fallback for gated routes
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Method fallback for `/api/login`, whose failures carry `isLogin: false`
pub async fn login_method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_login_response()
}

