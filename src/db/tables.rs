use redb::TableDefinition;

/// Users table: user_id -> UserRecord (serialized)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Email index: email -> user_id
/// Enforces email uniqueness and serves login lookups
pub const USER_EMAILS: TableDefinition<&str, &str> = TableDefinition::new("user_emails");

/// Accounts table: user_id -> AccountRecord (serialized)
pub const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

/// Talents table: talent_id -> TalentRecord (serialized)
pub const TALENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("talents");

/// Talent owner index: user_id -> talent_id
pub const TALENT_BY_USER: TableDefinition<&str, &str> = TableDefinition::new("talent_by_user");

/// Videos table: video_id -> VideoRecord (serialized)
pub const VIDEOS: TableDefinition<&str, &[u8]> = TableDefinition::new("videos");

/// Talent videos index: talent_id -> Vec<video_id> in display order
pub const TALENT_VIDEOS: TableDefinition<&str, &[u8]> = TableDefinition::new("talent_videos");
