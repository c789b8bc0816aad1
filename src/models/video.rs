use serde::{Deserialize, Serialize};

use super::timestamp_to_rfc3339;

/// Video record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub talent_id: String,
    pub url: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

/// Video model for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub talent_id: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<VideoRecord> for Video {
    fn from(record: VideoRecord) -> Self {
        Self {
            id: record.id,
            talent_id: record.talent_id,
            url: record.url,
            created_at: timestamp_to_rfc3339(record.created_at),
            updated_at: record.updated_at.map(timestamp_to_rfc3339),
        }
    }
}
