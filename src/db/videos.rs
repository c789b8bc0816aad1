use redb::{Database, ReadableTable};

use super::{decode, encode, tables};
use crate::error::{AppError, Result};
use crate::models::{new_id, VideoRecord};

/// Replace every video of a talent with one video per URL
///
/// The old rows are removed and the new ones inserted in the same write
/// transaction, so a crash cannot leave the talent with neither set.
/// Returned videos follow the order of `urls`.
pub fn replace(
    db: &Database,
    talent_id: &str,
    urls: &[String],
    now: i64,
) -> Result<Vec<VideoRecord>> {
    let write_txn = db.begin_write()?;
    let created = {
        let talents = write_txn.open_table(tables::TALENTS)?;
        if talents.get(talent_id)?.is_none() {
            return Err(AppError::TalentNotFound);
        }

        let mut talent_videos = write_txn.open_table(tables::TALENT_VIDEOS)?;
        let mut videos = write_txn.open_table(tables::VIDEOS)?;

        let old_ids: Vec<String> = match talent_videos.get(talent_id)? {
            Some(bytes) => decode(bytes.value())?,
            None => Vec::new(),
        };
        for id in &old_ids {
            videos.remove(id.as_str())?;
        }

        let mut created = Vec::with_capacity(urls.len());
        for url in urls {
            let video = VideoRecord {
                id: new_id(),
                talent_id: talent_id.to_string(),
                url: url.clone(),
                created_at: now,
                updated_at: None,
            };
            videos.insert(video.id.as_str(), encode(&video)?.as_slice())?;
            created.push(video);
        }

        let new_ids: Vec<&str> = created.iter().map(|v| v.id.as_str()).collect();
        talent_videos.insert(talent_id, encode(&new_ids)?.as_slice())?;

        tracing::debug!(
            "Replacing {} videos with {} for talent {}",
            old_ids.len(),
            created.len(),
            talent_id
        );
        created
    };
    write_txn.commit()?;

    Ok(created)
}

/// Videos of a talent in stored order; unknown talents have none
pub fn list(db: &Database, talent_id: &str) -> Result<Vec<VideoRecord>> {
    let read_txn = db.begin_read()?;
    let talent_videos = read_txn.open_table(tables::TALENT_VIDEOS)?;
    let ids: Vec<String> = match talent_videos.get(talent_id)? {
        Some(bytes) => decode(bytes.value())?,
        None => return Ok(Vec::new()),
    };

    let videos = read_txn.open_table(tables::VIDEOS)?;
    let mut listing = Vec::with_capacity(ids.len());
    for id in &ids {
        match videos.get(id.as_str())? {
            Some(bytes) => listing.push(decode(bytes.value())?),
            None => tracing::warn!("Video index points at missing video {}", id),
        }
    }
    Ok(listing)
}
