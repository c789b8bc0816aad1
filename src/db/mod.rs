pub mod tables;
pub mod talents;
pub mod users;
pub mod videos;

use redb::{Database, Error as RedbError, ReadableTableMetadata};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Database handle type (Arc-wrapped for sharing across handlers)
pub type Db = Arc<Database>;

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Open or create the redb database at the given path
///
/// Creates all required tables on first run.
#[allow(clippy::result_large_err)]
pub fn open_database(path: impl AsRef<Path>) -> Result<Db, RedbError> {
    tracing::info!("Opening database at: {:?}", path.as_ref());

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                RedbError::Io(e)
            })?;
        }
    }

    let db = Database::create(path)?;

    // Initialize tables on first run
    let write_txn = db.begin_write()?;
    {
        let _ = write_txn.open_table(tables::USERS)?;
        let _ = write_txn.open_table(tables::USER_EMAILS)?;
        let _ = write_txn.open_table(tables::ACCOUNTS)?;
        let _ = write_txn.open_table(tables::TALENTS)?;
        let _ = write_txn.open_table(tables::TALENT_BY_USER)?;
        let _ = write_txn.open_table(tables::VIDEOS)?;
        let _ = write_txn.open_table(tables::TALENT_VIDEOS)?;
    }
    write_txn.commit()?;

    tracing::info!("Database initialized successfully");

    Ok(Arc::new(db))
}

/// Row counts reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub talents: u64,
    pub videos: u64,
}

/// Count the main tables in one read transaction
///
/// Fails when a table is missing or the file cannot be read, which the
/// health endpoint reports as a disconnected database.
pub fn table_counts(db: &Database) -> crate::error::Result<TableCounts> {
    let read_txn = db.begin_read()?;
    Ok(TableCounts {
        users: read_txn.open_table(tables::USERS)?.len()?,
        talents: read_txn.open_table(tables::TALENTS)?.len()?,
        videos: read_txn.open_table(tables::VIDEOS)?.len()?,
    })
}

/// Serialize a record for storage
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, bincode::error::EncodeError> {
    bincode::serde::encode_to_vec(value, BINCODE_CONFIG)
}

/// Deserialize a stored record
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, bincode::error::DecodeError> {
    bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG).map(|(value, _)| value)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_database_creates_parent_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("talents.db");

        let db = open_database(&path).unwrap();

        assert!(path.exists());
        let read_txn = db.begin_read().unwrap();
        assert!(read_txn.open_table(tables::VIDEOS).is_ok());
    }

    #[test]
    fn test_table_counts() {
        let (_dir, db) = test_support::temp_db();
        assert_eq!(
            table_counts(&db).unwrap(),
            TableCounts { users: 0, talents: 0, videos: 0 }
        );

        let write_txn = db.begin_write().unwrap();
        {
            let mut users = write_txn.open_table(tables::USERS).unwrap();
            users.insert("u1", b"user".as_slice()).unwrap();
            let mut videos = write_txn.open_table(tables::VIDEOS).unwrap();
            videos.insert("v1", b"video".as_slice()).unwrap();
            videos.insert("v2", b"video".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        assert_eq!(
            table_counts(&db).unwrap(),
            TableCounts { users: 1, talents: 0, videos: 2 }
        );
    }

    #[test]
    fn test_record_codec() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let bytes = encode(&ids).unwrap();
        let decoded: Vec<String> = decode(&bytes).unwrap();
        assert_eq!(decoded, ids);
    }
}
