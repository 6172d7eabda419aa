//! Snapshot persistence for the record store.
//!
//! The whole store serializes to a single JSON document. The same structure
//! backs the on-disk mirror and the user-facing backup export, so a
//! previously exported file is always a valid import.

use crate::error::{Result, TrackerError};
use crate::seed::seed_state;
use crate::types::StoreState;
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::{self, File};
use std::path::Path;

/// File name of the serialized store snapshot.
pub const SNAPSHOT_FILE: &str = "snapshot.json";

const LOCK_FILE: &str = "LOCK";

/// Acquire the exclusive store lock.
pub(crate) fn acquire_lock(path: &Path) -> Result<File> {
    let lock_path = path.join(LOCK_FILE);
    let file = File::create(lock_path)?;
    file.try_lock_exclusive()
        .map_err(|_| TrackerError::Locked)?;
    Ok(file)
}

/// Serialize a state for the snapshot file or a backup export.
pub fn to_json(state: &StoreState) -> Result<String> {
    serde_json::to_string_pretty(state).map_err(Into::into)
}

/// Parse a stored or imported snapshot document.
///
/// Any parse or shape error rejects the whole document; there is no
/// partial merge.
pub fn parse_snapshot(raw: &str) -> Result<StoreState> {
    serde_json::from_str(raw).map_err(|e| TrackerError::Import(e.to_string()))
}

/// Load the snapshot from `path`, falling back to the seed dataset when
/// the file is missing or unreadable. Never fatal: the read path must not
/// fail because durable storage did.
pub(crate) fn load_or_seed(path: &Path, today: NaiveDate) -> StoreState {
    let snapshot_path = path.join(SNAPSHOT_FILE);
    if !snapshot_path.exists() {
        return seed_state(today);
    }

    let raw = match fs::read_to_string(&snapshot_path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(
                path = %snapshot_path.display(),
                %err,
                "unreadable snapshot, starting from seed data"
            );
            return seed_state(today);
        }
    };

    match parse_snapshot(&raw) {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!(
                path = %snapshot_path.display(),
                %err,
                "corrupt snapshot, starting from seed data"
            );
            seed_state(today)
        }
    }
}

/// Write the snapshot atomically: temp file first, then rename over the
/// previous snapshot so a failed write never truncates it.
pub(crate) fn write_snapshot(path: &Path, state: &StoreState) -> Result<()> {
    let raw = to_json(state)?;
    let tmp = path.join("snapshot.json.tmp");
    fs::write(&tmp, raw)?;
    fs::rename(&tmp, path.join(SNAPSHOT_FILE))?;
    Ok(())
}
