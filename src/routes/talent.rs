use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_PROFILE_URL_REQUIRED, ERR_USER_ID_REQUIRED};
use crate::db;
use crate::error::Result;
use crate::models::{Talent, TalentListing};
use crate::routes::auth::ApiKey;
use crate::routes::extract::AppJson;
use crate::routes::validation::{optional, required};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTalentRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "profileURL")]
    pub profile_url: Option<String>,
    #[serde(rename = "talentType")]
    pub talent_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTalentResponse {
    pub message: String,
    pub talent: Talent,
}

/// Create or update the caller's talent profile (upsert keyed by user id)
///
/// Mounted for every HTTP method.
pub async fn create_talent(
    State(state): State<AppState>,
    _key: ApiKey,
    AppJson(payload): AppJson<CreateTalentRequest>,
) -> Result<(StatusCode, Json<CreateTalentResponse>)> {
    let user_id = required(payload.user_id, ERR_USER_ID_REQUIRED)?;
    let profile_url = required(payload.profile_url, ERR_PROFILE_URL_REQUIRED)?;
    let talent_type = optional(payload.talent_type);

    let db = state.db.clone();
    let now = Utc::now().timestamp();
    let talent = tokio::task::spawn_blocking(move || {
        db::talents::upsert(&db, &user_id, &profile_url, talent_type, now)
    })
    .await??;

    Ok((
        StatusCode::CREATED,
        Json(CreateTalentResponse {
            message: "Profile created successfully".to_string(),
            talent: talent.into(),
        }),
    ))
}

/// List every user with their talent profile
pub async fn list_talents(
    State(state): State<AppState>,
    _key: ApiKey,
) -> Result<Json<Vec<TalentListing>>> {
    let db = state.db.clone();
    let listing = tokio::task::spawn_blocking(move || db::users::list_with_talents(&db)).await??;

    tracing::debug!("Listing {} talents", listing.len());

    Ok(Json(
        listing
            .into_iter()
            .map(|(user, talent)| TalentListing::new(user, talent))
            .collect(),
    ))
}
