use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::constants::ERR_MISSING_CREDENTIALS;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::routes::auth::ApiKey;
use crate::security::verify_password;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub is_login: bool,
    pub user: User,
}

/// Log a user in with email and password
///
/// Every failure, including the API key gate and malformed bodies, answers
/// with `isLogin: false`. Unknown emails and wrong passwords share the same
/// 401 so callers cannot tell which one failed.
pub async fn login(
    State(state): State<AppState>,
    api_key: std::result::Result<ApiKey, AppError>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    match authenticate(state, api_key, payload).await {
        Ok(user) => (
            StatusCode::OK,
            Json(LoginResponse {
                message: "Login successful".to_string(),
                is_login: true,
                user: user.into(),
            }),
        )
            .into_response(),
        Err(e) => e.into_login_response(),
    }
}

async fn authenticate(
    state: AppState,
    api_key: std::result::Result<ApiKey, AppError>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<crate::models::UserRecord> {
    api_key?;

    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!("Malformed login body: {}", rejection.body_text());
        AppError::InvalidInput(ERR_MISSING_CREDENTIALS.to_string())
    })?;

    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(AppError::InvalidInput(ERR_MISSING_CREDENTIALS.to_string())),
    };

    let db = state.db.clone();
    let (user, account) = tokio::task::spawn_blocking(move || -> Result<_> {
        let user = match db::users::find_by_email(&db, &email)? {
            Some(user) => user,
            None => return Ok((None, None)),
        };
        let account = db::users::find_account(&db, &user.id)?;
        Ok((Some(user), account))
    })
    .await??;

    let user = user.ok_or_else(|| {
        tracing::info!("Login attempt for unknown email");
        AppError::InvalidCredentials
    })?;

    // A user without an account verifies against an empty hash and fails
    let stored_hash = account.map(|a| a.password_hash).unwrap_or_default();
    let matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;

    if !matches {
        tracing::info!("Failed login for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!("User {} logged in", user.id);
    Ok(user)
}
