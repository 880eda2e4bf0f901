//! Snapshot sink — writes one completed session as a pretty-printed JSON
//! file named by its timestamp. Files are create-new: a record is never
//! overwritten.

use std::fs;
use std::path::Path;

use chrono::DateTime;
use tracing::info;

use crate::errors::AppError;
use crate::store::SessionRecord;

/// Writes the record under `data_dir`, returning the file name.
pub fn save(data_dir: &str, record: &SessionRecord) -> Result<String, AppError> {
    fs::create_dir_all(data_dir)
        .map_err(|e| AppError::Persistence(format!("Could not create data directory: {e}")))?;

    let stamp = DateTime::parse_from_rfc3339(&record.timestamp)
        .map_err(|e| AppError::Persistence(format!("Invalid record timestamp: {e}")))?
        .format("%Y%m%d_%H%M%S");
    let filename = format!("screening_{stamp}.json");
    let path = Path::new(data_dir).join(&filename);

    let file = fs::File::options()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| AppError::Persistence(format!("Could not create {filename}: {e}")))?;

    serde_json::to_writer_pretty(file, record)
        .map_err(|e| AppError::Persistence(format!("Could not write {filename}: {e}")))?;

    info!("Saved session snapshot to {filename}");
    Ok(filename)
}
