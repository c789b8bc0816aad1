use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_EMAIL_REQUIRED, ERR_PASSWORD_REQUIRED};
use crate::db;
use crate::error::Result;
use crate::models::{new_id, AccountRecord, TalentRecord, User, UserRecord};
use crate::routes::auth::ApiKey;
use crate::routes::extract::AppJson;
use crate::routes::validation::{optional, required};
use crate::security::hash_secret;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub birthdate: String,
    #[serde(default)]
    pub gender: String,
    /// Talent type of the profile created alongside the user
    pub talent: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

/// Register a new user
///
/// Creates the user, their account (Argon2 password hash) and a talent
/// profile whose avatar defaults from the user's gender. Everything is
/// written in one transaction.
///
/// Returns 400 when the password or email is missing (nothing is written),
/// 409 when the email is already registered.
pub async fn register_user(
    State(state): State<AppState>,
    _key: ApiKey,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let password = required(payload.password, ERR_PASSWORD_REQUIRED)?;
    let email = required(payload.email, ERR_EMAIL_REQUIRED)?;

    let password_hash = tokio::task::spawn_blocking(move || hash_secret(&password)).await??;

    let now = Utc::now().timestamp();
    let user = UserRecord {
        id: new_id(),
        first_name: payload.first_name,
        middle_name: optional(payload.middle_name),
        last_name: payload.last_name,
        birthdate: payload.birthdate,
        gender: payload.gender,
        email,
        created_at: now,
        updated_at: None,
    };
    let account = AccountRecord {
        id: new_id(),
        user_id: user.id.clone(),
        password_hash,
        created_at: now,
        updated_at: None,
    };
    let talent = TalentRecord {
        id: new_id(),
        user_id: user.id.clone(),
        profile_url: TalentRecord::default_profile_url(&user.gender).to_string(),
        talent_type: optional(payload.talent),
        created_at: now,
        updated_at: None,
    };

    let db = state.db.clone();
    let user = tokio::task::spawn_blocking(move || -> Result<UserRecord> {
        db::users::register(&db, &user, &account, &talent)?;
        Ok(user)
    })
    .await??;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

