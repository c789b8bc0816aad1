use serde::{Deserialize, Serialize};

use super::timestamp_to_rfc3339;

/// User record stored in redb
/// Uses Unix timestamps for compact storage with bincode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birthdate: String,
    pub gender: String,
    /// Unique; indexed in the `user_emails` table
    pub email: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

/// User model for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birthdate: String,
    pub gender: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            middle_name: record.middle_name,
            last_name: record.last_name,
            birthdate: record.birthdate,
            gender: record.gender,
            email: record.email,
            created_at: timestamp_to_rfc3339(record.created_at),
            updated_at: record.updated_at.map(timestamp_to_rfc3339),
        }
    }
}

/// Whether a gender value selects the male default avatar
pub fn is_male(gender: &str) -> bool {
    gender.trim().eq_ignore_ascii_case("male")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> UserRecord {
        UserRecord {
            id: "user-1".to_string(),
            first_name: "Ada".to_string(),
            middle_name: None,
            last_name: "Lovelace".to_string(),
            birthdate: "1815-12-10".to_string(),
            gender: "female".to_string(),
            email: "ada@example.com".to_string(),
            created_at: 1733788800,
            updated_at: None,
        }
    }

    #[test]
    fn test_is_male() {
        assert!(is_male("male"));
        assert!(is_male("Male"));
        assert!(is_male(" MALE "));
        assert!(!is_male("female"));
        assert!(!is_male(""));
    }

    #[test]
    fn test_user_json_uses_camel_case() {
        let user = User::from(sample_record());
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["lastName"], "Lovelace");
        assert!(value["middleName"].is_null());
        assert_eq!(value["createdAt"], "2024-12-10T00:00:00+00:00");
        assert!(value.get("first_name").is_none());
    }
}
