use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_INVALID_BODY, ERR_TALENT_ID_REQUIRED, ERR_URLS_REQUIRED};
use crate::db;
use crate::error::{AppError, Result};
use crate::models::Video;
use crate::routes::auth::ApiKey;
use crate::routes::extract::AppJson;
use crate::routes::validation::required;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateVideosRequest {
    #[serde(rename = "talentId")]
    pub talent_id: Option<String>,
    pub urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CreateVideosResponse {
    pub message: String,
    pub videos: Vec<Video>,
}

/// `talentId` may arrive in the query string or in a JSON body
#[derive(Debug, Default, Deserialize)]
pub struct VideosParams {
    #[serde(rename = "talentId")]
    pub talent_id: Option<String>,
}

/// Replace all videos of a talent with the given URLs
///
/// Old videos are deleted and the new ones created atomically: the talent
/// ends up with exactly `urls`, in order. An explicit empty list clears
/// them; a missing `urls` is rejected.
pub async fn create_videos(
    State(state): State<AppState>,
    _key: ApiKey,
    AppJson(payload): AppJson<CreateVideosRequest>,
) -> Result<(StatusCode, Json<CreateVideosResponse>)> {
    let talent_id = required(payload.talent_id, ERR_TALENT_ID_REQUIRED)?;
    let urls = payload
        .urls
        .ok_or_else(|| AppError::InvalidInput(ERR_URLS_REQUIRED.to_string()))?;

    let db = state.db.clone();
    let now = Utc::now().timestamp();
    let videos =
        tokio::task::spawn_blocking(move || db::videos::replace(&db, &talent_id, &urls, now))
            .await??;

    tracing::info!("Stored {} videos", videos.len());

    Ok((
        StatusCode::CREATED,
        Json(CreateVideosResponse {
            message: "Videos created successfully".to_string(),
            videos: videos.into_iter().map(Video::from).collect(),
        }),
    ))
}

/// List the videos of a talent
///
/// Public read. Clients historically send `talentId` in a GET body; the
/// query parameter takes precedence when both are present.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<VideosParams>,
    body: Bytes,
) -> Result<Json<Vec<Video>>> {
    let from_body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<VideosParams>(&body)
            .map_err(|e| {
                tracing::debug!("Rejected videos query body: {}", e);
                AppError::InvalidInput(ERR_INVALID_BODY.to_string())
            })?
            .talent_id
    };
    let talent_id = required(query.talent_id.or(from_body), ERR_TALENT_ID_REQUIRED)?;

    let db = state.db.clone();
    let videos = tokio::task::spawn_blocking(move || db::videos::list(&db, &talent_id)).await??;

    Ok(Json(videos.into_iter().map(Video::from).collect()))
}
