pub mod account;
pub mod talent;
pub mod user;
pub mod video;

pub use account::{Account, AccountRecord};
pub use talent::{Talent, TalentListing, TalentRecord, TalentSummary};
pub use user::{User, UserRecord};
pub use video::{Video, VideoRecord};

use chrono::{DateTime, Utc};

/// Convert Unix timestamp to RFC3339 string, defaulting to now if invalid
pub fn timestamp_to_rfc3339(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_else(Utc::now)
        .to_rfc3339()
}

/// Generate a fresh record id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
