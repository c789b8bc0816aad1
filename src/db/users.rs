use redb::{Database, ReadableTable};

use super::{decode, encode, tables};
use crate::error::{AppError, Result};
use crate::models::{AccountRecord, TalentRecord, UserRecord};

/// Editable profile fields of a user; `None` leaves a field unchanged
///
/// An empty `middle_name` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
}

/// Insert a user together with their account and talent profile
///
/// All three records and both indexes are written in a single transaction,
/// so a failure never leaves a user without its account or talent.
pub fn register(
    db: &Database,
    user: &UserRecord,
    account: &AccountRecord,
    talent: &TalentRecord,
) -> Result<()> {
    let write_txn = db.begin_write()?;
    {
        let mut emails = write_txn.open_table(tables::USER_EMAILS)?;
        if emails.get(user.email.as_str())?.is_some() {
            tracing::info!("Registration rejected: email already in use");
            return Err(AppError::EmailTaken);
        }
        emails.insert(user.email.as_str(), user.id.as_str())?;

        let mut users = write_txn.open_table(tables::USERS)?;
        users.insert(user.id.as_str(), encode(user)?.as_slice())?;

        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;
        accounts.insert(user.id.as_str(), encode(account)?.as_slice())?;

        let mut talents = write_txn.open_table(tables::TALENTS)?;
        talents.insert(talent.id.as_str(), encode(talent)?.as_slice())?;

        let mut talent_by_user = write_txn.open_table(tables::TALENT_BY_USER)?;
        talent_by_user.insert(user.id.as_str(), talent.id.as_str())?;
    }
    write_txn.commit()?;

    tracing::info!("New user registered: {}", user.id);
    Ok(())
}

/// Look up a user by id
pub fn find(db: &Database, user_id: &str) -> Result<Option<UserRecord>> {
    let read_txn = db.begin_read()?;
    let users = read_txn.open_table(tables::USERS)?;
    let record = match users.get(user_id)? {
        Some(bytes) => Some(decode(bytes.value())?),
        None => None,
    };
    Ok(record)
}

/// Look up a user by their (unique) email
pub fn find_by_email(db: &Database, email: &str) -> Result<Option<UserRecord>> {
    let read_txn = db.begin_read()?;
    let emails = read_txn.open_table(tables::USER_EMAILS)?;
    let user_id = match emails.get(email)? {
        Some(id) => id.value().to_string(),
        None => return Ok(None),
    };

    let users = read_txn.open_table(tables::USERS)?;
    let record = match users.get(user_id.as_str())? {
        Some(bytes) => Some(decode(bytes.value())?),
        None => {
            tracing::warn!("Email index points at missing user {}", user_id);
            None
        }
    };
    Ok(record)
}

/// Look up the account holding a user's password hash
pub fn find_account(db: &Database, user_id: &str) -> Result<Option<AccountRecord>> {
    let read_txn = db.begin_read()?;
    let accounts = read_txn.open_table(tables::ACCOUNTS)?;
    let record = match accounts.get(user_id)? {
        Some(bytes) => Some(decode(bytes.value())?),
        None => None,
    };
    Ok(record)
}

/// Apply a profile update to a user
///
/// Moves the email index when the email changes. When the gender change
/// selects a different default avatar, the linked talent's profile URL is
/// reset to that avatar.
pub fn update_profile(
    db: &Database,
    user_id: &str,
    update: ProfileUpdate,
    now: i64,
) -> Result<UserRecord> {
    let write_txn = db.begin_write()?;
    let updated = {
        let mut users = write_txn.open_table(tables::USERS)?;
        let existing: UserRecord = match users.get(user_id)? {
            Some(bytes) => decode(bytes.value())?,
            None => return Err(AppError::UserNotFound),
        };

        let email = update.email.unwrap_or_else(|| existing.email.clone());
        if existing.email != email {
            let mut emails = write_txn.open_table(tables::USER_EMAILS)?;
            let owner = emails.get(email.as_str())?.map(|id| id.value().to_string());
            if let Some(owner) = owner {
                if owner != user_id {
                    return Err(AppError::EmailTaken);
                }
            }
            emails.remove(existing.email.as_str())?;
            emails.insert(email.as_str(), user_id)?;
        }

        let gender = update.gender.unwrap_or_else(|| existing.gender.clone());
        let new_avatar = TalentRecord::default_profile_url(&gender);
        if TalentRecord::default_profile_url(&existing.gender) != new_avatar {
            reset_talent_avatar(&write_txn, user_id, new_avatar, now)?;
        }

        let middle_name = match update.middle_name {
            Some(m) if m.trim().is_empty() => None,
            Some(m) => Some(m),
            None => existing.middle_name,
        };

        let updated = UserRecord {
            id: existing.id,
            first_name: update.first_name.unwrap_or(existing.first_name),
            middle_name,
            last_name: update.last_name.unwrap_or(existing.last_name),
            birthdate: update.birthdate.unwrap_or(existing.birthdate),
            gender,
            email,
            created_at: existing.created_at,
            updated_at: Some(now),
        };
        users.insert(user_id, encode(&updated)?.as_slice())?;
        updated
    };
    write_txn.commit()?;

    tracing::info!("Profile updated for user {}", user_id);
    Ok(updated)
}

fn reset_talent_avatar(
    write_txn: &redb::WriteTransaction,
    user_id: &str,
    profile_url: &str,
    now: i64,
) -> Result<()> {
    let talent_by_user = write_txn.open_table(tables::TALENT_BY_USER)?;
    let talent_id = match talent_by_user.get(user_id)? {
        Some(id) => id.value().to_string(),
        None => return Ok(()),
    };

    let mut talents = write_txn.open_table(tables::TALENTS)?;
    let talent: Option<TalentRecord> = match talents.get(talent_id.as_str())? {
        Some(bytes) => Some(decode(bytes.value())?),
        None => None,
    };
    if let Some(mut talent) = talent {
        talent.profile_url = profile_url.to_string();
        talent.updated_at = Some(now);
        talents.insert(talent_id.as_str(), encode(&talent)?.as_slice())?;
        tracing::debug!("Reset avatar of talent {} after gender change", talent_id);
    }
    Ok(())
}

/// Store a new password hash on a user's account
pub fn update_password(
    db: &Database,
    user_id: &str,
    password_hash: String,
    now: i64,
) -> Result<AccountRecord> {
    let write_txn = db.begin_write()?;
    let account = {
        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;
        let mut account: AccountRecord = match accounts.get(user_id)? {
            Some(bytes) => decode(bytes.value())?,
            None => return Err(AppError::AccountNotFound),
        };
        account.password_hash = password_hash;
        account.updated_at = Some(now);
        accounts.insert(user_id, encode(&account)?.as_slice())?;
        account
    };
    write_txn.commit()?;

    tracing::info!("Password updated for user {}", user_id);
    Ok(account)
}

/// All users paired with their talent profile, oldest registration first
pub fn list_with_talents(db: &Database) -> Result<Vec<(UserRecord, Option<TalentRecord>)>> {
    let read_txn = db.begin_read()?;
    let users = read_txn.open_table(tables::USERS)?;
    let talent_by_user = read_txn.open_table(tables::TALENT_BY_USER)?;
    let talents = read_txn.open_table(tables::TALENTS)?;

    let mut listing = Vec::new();
    for entry in users.iter()? {
        let (_, bytes) = entry?;
        let user: UserRecord = decode(bytes.value())?;

        let talent_id = talent_by_user
            .get(user.id.as_str())?
            .map(|id| id.value().to_string());
        let talent = match talent_id {
            Some(talent_id) => match talents.get(talent_id.as_str())? {
                Some(bytes) => Some(decode::<TalentRecord>(bytes.value())?),
                None => None,
            },
            None => None,
        };

        listing.push((user, talent));
    }

    listing.sort_by(|(a, _), (b, _)| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FEMALE_PROFILE_URL, MALE_PROFILE_URL};
    use crate::db::test_support::temp_db;

    fn records(id: &str, email: &str, gender: &str, created_at: i64) -> (UserRecord, AccountRecord, TalentRecord) {
        let user = UserRecord {
            id: id.to_string(),
            first_name: "Juan".to_string(),
            middle_name: Some("Santos".to_string()),
            last_name: "Cruz".to_string(),
            birthdate: "2000-01-01".to_string(),
            gender: gender.to_string(),
            email: email.to_string(),
            created_at,
            updated_at: None,
        };
        let account = AccountRecord {
            id: format!("account-{}", id),
            user_id: id.to_string(),
            password_hash: "hash".to_string(),
            created_at,
            updated_at: None,
        };
        let talent = TalentRecord {
            id: format!("talent-{}", id),
            user_id: id.to_string(),
            profile_url: TalentRecord::default_profile_url(gender).to_string(),
            talent_type: Some("dancer".to_string()),
            created_at,
            updated_at: None,
        };
        (user, account, talent)
    }

    #[test]
    fn test_register_and_lookup() {
        let (_dir, db) = temp_db();
        let (user, account, talent) = records("u1", "juan@example.com", "male", 100);

        register(&db, &user, &account, &talent).unwrap();

        let by_email = find_by_email(&db, "juan@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, "u1");
        assert!(find(&db, "u1").unwrap().is_some());
        assert_eq!(find_account(&db, "u1").unwrap().unwrap().password_hash, "hash");
        assert!(find_by_email(&db, "nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_register_duplicate_email_writes_nothing() {
        let (_dir, db) = temp_db();
        let (user, account, talent) = records("u1", "juan@example.com", "male", 100);
        register(&db, &user, &account, &talent).unwrap();

        let (dup, dup_account, dup_talent) = records("u2", "juan@example.com", "male", 200);
        assert!(matches!(
            register(&db, &dup, &dup_account, &dup_talent),
            Err(AppError::EmailTaken)
        ));
        assert!(find(&db, "u2").unwrap().is_none());
        assert!(find_account(&db, "u2").unwrap().is_none());
    }

    #[test]
    fn test_update_profile_gender_change_resets_avatar() {
        let (_dir, db) = temp_db();
        let (user, account, talent) = records("u1", "juan@example.com", "male", 100);
        register(&db, &user, &account, &talent).unwrap();

        let update = ProfileUpdate {
            gender: Some("female".to_string()),
            ..Default::default()
        };
        let updated = update_profile(&db, "u1", update, 500).unwrap();

        assert_eq!(updated.gender, "female");
        assert_eq!(updated.updated_at, Some(500));
        let (_, talent) = list_with_talents(&db).unwrap().remove(0);
        assert_eq!(talent.unwrap().profile_url, FEMALE_PROFILE_URL);
    }

    #[test]
    fn test_update_profile_keeps_custom_avatar_without_gender_change() {
        let (_dir, db) = temp_db();
        let (user, account, mut talent) = records("u1", "juan@example.com", "male", 100);
        talent.profile_url = "https://cdn.example.com/custom.jpg".to_string();
        register(&db, &user, &account, &talent).unwrap();

        let update = ProfileUpdate {
            first_name: Some("Jose".to_string()),
            gender: Some("Male".to_string()),
            ..Default::default()
        };
        update_profile(&db, "u1", update, 500).unwrap();

        let (user, talent) = list_with_talents(&db).unwrap().remove(0);
        assert_eq!(user.first_name, "Jose");
        assert_eq!(user.last_name, "Cruz");
        assert_eq!(user.middle_name.as_deref(), Some("Santos"));
        let profile_url = talent.unwrap().profile_url;
        assert_eq!(profile_url, "https://cdn.example.com/custom.jpg");
        assert_ne!(profile_url, MALE_PROFILE_URL);
    }

    #[test]
    fn test_update_profile_moves_email_index() {
        let (_dir, db) = temp_db();
        let (user, account, talent) = records("u1", "old@example.com", "male", 100);
        register(&db, &user, &account, &talent).unwrap();

        let update = ProfileUpdate {
            email: Some("new@example.com".to_string()),
            middle_name: Some(String::new()),
            ..Default::default()
        };
        let updated = update_profile(&db, "u1", update, 500).unwrap();

        assert!(updated.middle_name.is_none());

        assert!(find_by_email(&db, "old@example.com").unwrap().is_none());
        assert_eq!(find_by_email(&db, "new@example.com").unwrap().unwrap().id, "u1");
    }

    #[test]
    fn test_update_profile_rejects_taken_email() {
        let (_dir, db) = temp_db();
        let (a, a_account, a_talent) = records("u1", "a@example.com", "male", 100);
        let (b, b_account, b_talent) = records("u2", "b@example.com", "male", 200);
        register(&db, &a, &a_account, &a_talent).unwrap();
        register(&db, &b, &b_account, &b_talent).unwrap();

        let update = ProfileUpdate {
            email: Some("b@example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            update_profile(&db, "u1", update, 500),
            Err(AppError::EmailTaken)
        ));
        assert_eq!(find_by_email(&db, "a@example.com").unwrap().unwrap().id, "u1");
    }

    #[test]
    fn test_update_missing_user_and_account() {
        let (_dir, db) = temp_db();
        assert!(matches!(
            update_profile(&db, "ghost", ProfileUpdate::default(), 500),
            Err(AppError::UserNotFound)
        ));
        assert!(matches!(
            update_password(&db, "ghost", "hash".to_string(), 500),
            Err(AppError::AccountNotFound)
        ));
    }

    #[test]
    fn test_update_password_replaces_hash() {
        let (_dir, db) = temp_db();
        let (user, account, talent) = records("u1", "juan@example.com", "male", 100);
        register(&db, &user, &account, &talent).unwrap();

        let updated = update_password(&db, "u1", "new-hash".to_string(), 700).unwrap();

        assert_eq!(updated.updated_at, Some(700));
        assert_eq!(find_account(&db, "u1").unwrap().unwrap().password_hash, "new-hash");
    }

    #[test]
    fn test_list_with_talents_orders_by_registration() {
        let (_dir, db) = temp_db();
        let (late, late_account, late_talent) = records("u-late", "late@example.com", "female", 900);
        let (early, early_account, early_talent) = records("u-early", "early@example.com", "male", 100);
        register(&db, &late, &late_account, &late_talent).unwrap();
        register(&db, &early, &early_account, &early_talent).unwrap();

        let listing = list_with_talents(&db).unwrap();
        let ids: Vec<&str> = listing.iter().map(|(u, _)| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u-early", "u-late"]);
        assert!(listing.iter().all(|(_, t)| t.is_some()));
    }
}
