use redb::{Database, ReadableTable};

use super::{decode, encode, tables};
use crate::error::{AppError, Result};
use crate::models::{new_id, TalentRecord};

/// Create or update the talent profile owned by `user_id`
///
/// An existing profile keeps its id and gets the new profile URL (and talent
/// type, when one is given). Fails with `UserNotFound` for unknown users.
pub fn upsert(
    db: &Database,
    user_id: &str,
    profile_url: &str,
    talent_type: Option<String>,
    now: i64,
) -> Result<TalentRecord> {
    let write_txn = db.begin_write()?;
    let talent = {
        let users = write_txn.open_table(tables::USERS)?;
        if users.get(user_id)?.is_none() {
            return Err(AppError::UserNotFound);
        }

        let mut talent_by_user = write_txn.open_table(tables::TALENT_BY_USER)?;
        let mut talents = write_txn.open_table(tables::TALENTS)?;

        let existing_id = talent_by_user
            .get(user_id)?
            .map(|id| id.value().to_string());
        let existing: Option<TalentRecord> = match &existing_id {
            Some(talent_id) => match talents.get(talent_id.as_str())? {
                Some(bytes) => Some(decode(bytes.value())?),
                None => None,
            },
            None => None,
        };

        let talent = match existing {
            Some(mut talent) => {
                talent.profile_url = profile_url.to_string();
                if talent_type.is_some() {
                    talent.talent_type = talent_type;
                }
                talent.updated_at = Some(now);
                talent
            }
            None => TalentRecord {
                id: new_id(),
                user_id: user_id.to_string(),
                profile_url: profile_url.to_string(),
                talent_type,
                created_at: now,
                updated_at: None,
            },
        };

        talents.insert(talent.id.as_str(), encode(&talent)?.as_slice())?;
        talent_by_user.insert(user_id, talent.id.as_str())?;
        talent
    };
    write_txn.commit()?;

    tracing::info!("Talent {} saved for user {}", talent.id, user_id);
    Ok(talent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_db;
    use crate::db::users;
    use crate::models::{AccountRecord, UserRecord};

    fn register_user(db: &Database, user_id: &str, with_talent: bool) {
        let user = UserRecord {
            id: user_id.to_string(),
            first_name: "Maria".to_string(),
            middle_name: None,
            last_name: "Clara".to_string(),
            birthdate: "1999-05-05".to_string(),
            gender: "female".to_string(),
            email: format!("{}@example.com", user_id),
            created_at: 100,
            updated_at: None,
        };
        let account = AccountRecord {
            id: format!("account-{}", user_id),
            user_id: user_id.to_string(),
            password_hash: "hash".to_string(),
            created_at: 100,
            updated_at: None,
        };
        let talent = TalentRecord {
            id: format!("talent-{}", user_id),
            user_id: user_id.to_string(),
            profile_url: "https://cdn.example.com/default.jpg".to_string(),
            talent_type: Some("singer".to_string()),
            created_at: 100,
            updated_at: None,
        };
        users::register(db, &user, &account, &talent).unwrap();

        if !with_talent {
            let write_txn = db.begin_write().unwrap();
            {
                let mut index = write_txn.open_table(tables::TALENT_BY_USER).unwrap();
                index.remove(user_id).unwrap();
            }
            write_txn.commit().unwrap();
        }
    }

    fn find_by_user(db: &Database, user_id: &str) -> Result<Option<TalentRecord>> {
        let read_txn = db.begin_read()?;
        let talent_by_user = read_txn.open_table(tables::TALENT_BY_USER)?;
        let talent_id = match talent_by_user.get(user_id)? {
            Some(id) => id.value().to_string(),
            None => return Ok(None),
        };

        let talents = read_txn.open_table(tables::TALENTS)?;
        let record = match talents.get(talent_id.as_str())? {
            Some(bytes) => Some(decode(bytes.value())?),
            None => None,
        };
        Ok(record)
    }

    #[test]
    fn test_upsert_updates_existing_profile() {
        let (_dir, db) = temp_db();
        register_user(&db, "u1", true);

        let talent = upsert(&db, "u1", "https://cdn.example.com/new.jpg", None, 300).unwrap();

        assert_eq!(talent.id, "talent-u1");
        assert_eq!(talent.profile_url, "https://cdn.example.com/new.jpg");
        assert_eq!(talent.talent_type.as_deref(), Some("singer"));
        assert_eq!(talent.updated_at, Some(300));
    }

    #[test]
    fn test_upsert_creates_missing_profile() {
        let (_dir, db) = temp_db();
        register_user(&db, "u1", false);
        assert!(find_by_user(&db, "u1").unwrap().is_none());

        let talent = upsert(
            &db,
            "u1",
            "https://cdn.example.com/new.jpg",
            Some("actor".to_string()),
            300,
        )
        .unwrap();

        assert_eq!(talent.created_at, 300);
        assert!(talent.updated_at.is_none());
        let stored = find_by_user(&db, "u1").unwrap().unwrap();
        assert_eq!(stored.id, talent.id);
        assert_eq!(stored.talent_type.as_deref(), Some("actor"));
    }

    #[test]
    fn test_upsert_unknown_user() {
        let (_dir, db) = temp_db();

        assert!(matches!(
            upsert(&db, "ghost", "https://cdn.example.com/x.jpg", None, 300),
            Err(AppError::UserNotFound)
        ));
        assert!(find_by_user(&db, "ghost").unwrap().is_none());
    }
}
