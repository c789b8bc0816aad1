use serde::{Deserialize, Serialize};

use super::timestamp_to_rfc3339;

/// Account record stored in redb, keyed by user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    pub user_id: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

/// Account model for API responses (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            created_at: timestamp_to_rfc3339(record.created_at),
            updated_at: record.updated_at.map(timestamp_to_rfc3339),
        }
    }
}
