use serde::{Deserialize, Serialize};

use super::timestamp_to_rfc3339;
use super::user::{is_male, UserRecord};
use crate::constants::{FEMALE_PROFILE_URL, MALE_PROFILE_URL};

/// Talent profile record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentRecord {
    pub id: String,
    /// Unique; indexed in the `talent_by_user` table
    pub user_id: String,
    pub profile_url: String,
    pub talent_type: Option<String>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl TalentRecord {
    /// Default avatar for a gender: the male image for "male", female otherwise
    pub fn default_profile_url(gender: &str) -> &'static str {
        if is_male(gender) {
            MALE_PROFILE_URL
        } else {
            FEMALE_PROFILE_URL
        }
    }
}

/// Talent model for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Talent {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "profileURL")]
    pub profile_url: String,
    pub talent_type: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<TalentRecord> for Talent {
    fn from(record: TalentRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            profile_url: record.profile_url,
            talent_type: record.talent_type,
            created_at: timestamp_to_rfc3339(record.created_at),
            updated_at: record.updated_at.map(timestamp_to_rfc3339),
        }
    }
}

/// Talent fields embedded in the talent listing
#[derive(Debug, Clone, Serialize)]
pub struct TalentSummary {
    pub id: String,
    #[serde(rename = "profileURL")]
    pub profile_url: String,
}

/// One entry of `GET /api/talents`: a user's name plus their talent profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentListing {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub talent: Option<TalentSummary>,
}

impl TalentListing {
    pub fn new(user: UserRecord, talent: Option<TalentRecord>) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            middle_name: user.middle_name,
            last_name: user.last_name,
            talent: talent.map(|t| TalentSummary {
                id: t.id,
                profile_url: t.profile_url,
            }),
        }
    }
}
