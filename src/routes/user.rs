use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_PASSWORD_REQUIRED, ERR_USER_ID_REQUIRED};
use crate::db::{self, users::ProfileUpdate};
use crate::error::Result;
use crate::models::{Account, User};
use crate::routes::auth::ApiKey;
use crate::routes::extract::AppJson;
use crate::routes::validation::required;
use crate::security::hash_secret;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
    pub message: String,
    pub user_profile: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordResponse {
    pub message: String,
    pub updated_account: Account,
}

/// Update a user's profile
///
/// Fields left out of the body keep their stored value. A gender change that
/// switches the default avatar also resets the talent's profile URL.
pub async fn update_user(
    State(state): State<AppState>,
    _key: ApiKey,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>> {
    let user_id = required(payload.id, ERR_USER_ID_REQUIRED)?;
    let update = ProfileUpdate {
        first_name: payload.first_name,
        middle_name: payload.middle_name,
        last_name: payload.last_name,
        birthdate: payload.birthdate,
        gender: payload.gender,
        // A blank email would orphan the login index entry
        email: payload.email.filter(|e| !e.trim().is_empty()),
    };

    let db = state.db.clone();
    let now = Utc::now().timestamp();
    let user = tokio::task::spawn_blocking(move || {
        db::users::update_profile(&db, &user_id, update, now)
    })
    .await??;

    Ok(Json(UpdateUserResponse {
        message: "Profile updated successfully".to_string(),
        user_profile: user.into(),
    }))
}

/// Replace a user's password
pub async fn update_password(
    State(state): State<AppState>,
    _key: ApiKey,
    AppJson(payload): AppJson<UpdatePasswordRequest>,
) -> Result<Json<UpdatePasswordResponse>> {
    let user_id = required(payload.user_id, ERR_USER_ID_REQUIRED)?;
    let password = required(payload.password, ERR_PASSWORD_REQUIRED)?;

    let password_hash = tokio::task::spawn_blocking(move || hash_secret(&password)).await??;

    let db = state.db.clone();
    let now = Utc::now().timestamp();
    let account = tokio::task::spawn_blocking(move || {
        db::users::update_password(&db, &user_id, password_hash, now)
    })
    .await??;

    Ok(Json(UpdatePasswordResponse {
        message: "Password updated successfully".to_string(),
        updated_account: account.into(),
    }))
}
