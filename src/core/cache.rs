//! Snapshot cache
//!
//! The built dataset is a pure function of the five source files, so it can
//! be persisted and reused: the cache key is a SHA256 fingerprint over the
//! table files' contents, and the payload is the JSON-serialized snapshot
//! stored in the user cache directory. Any cache miss, read failure, or
//! stale entry falls back to a plain rebuild; caching never affects
//! correctness, only load time.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::core::dataset::Dataset;
use crate::core::loader::{self, LoadError, TABLE_FILES};

/// Compute the SHA256 fingerprint of the five table files
///
/// The digest covers each file name and its full contents in load order, so
/// any edit to any table produces a new fingerprint.
pub fn fingerprint(dir: &Path) -> Result<String, LoadError> {
    let mut hasher = Sha256::new();
    for file in TABLE_FILES {
        let path = dir.join(file);
        let content = fs::read(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::MissingTable { path: path.clone() },
            _ => LoadError::Io { path: path.clone(), source },
        })?;
        hasher.update(file.as_bytes());
        hasher.update((content.len() as u64).to_le_bytes());
        hasher.update(&content);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn cache_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "sat").map(|dirs| dirs.cache_dir().to_path_buf())
}

fn snapshot_path(fp: &str) -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(format!("snapshot-{fp}.json")))
}

/// Load the snapshot for a data directory, using the cache when possible
///
/// Returns the dataset and whether it came from the cache. Only structural
/// load failures are errors; a broken or unwritable cache silently degrades
/// to building from the CSVs.
pub fn load_or_build(dir: &Path) -> Result<(Dataset, bool), LoadError> {
    let fp = fingerprint(dir)?;

    if let Some(path) = snapshot_path(&fp) {
        if let Some(dataset) = read_snapshot(&path) {
            return Ok((dataset, true));
        }
    }

    let dataset = build(dir)?;

    if let Some(path) = snapshot_path(&fp) {
        write_snapshot(&path, &dataset);
    }

    Ok((dataset, false))
}

/// Build the snapshot directly from the CSVs, bypassing the cache
pub fn build(dir: &Path) -> Result<Dataset, LoadError> {
    let raw = loader::load_dir(dir)?;
    Ok(Dataset::build(raw))
}

fn read_snapshot(path: &Path) -> Option<Dataset> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn write_snapshot(path: &Path, dataset: &Dataset) {
    let Some(parent) = path.parent() else {
        return;
    };
    if fs::create_dir_all(parent).is_err() {
        return;
    }
    if let Ok(json) = serde_json::to_string(dataset) {
        // Ignore write failures; the cache is best-effort
        let _ = fs::write(path, json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_tables(dir: &Path) {
        fs::write(
            dir.join(loader::ORDERS_FILE),
            "order_id,part_number,part_description,supplier_name,quantity,unit_price,order_date,promised_date,actual_delivery_date\n\
             PO-1,HX-100,Plate,Acme Inc.,10,12.50,2024-01-02,2024-02-01,2024-02-08\n",
        )
        .unwrap();
        fs::write(
            dir.join(loader::INSPECTIONS_FILE),
            "order_id,inspection_date,parts_inspected,parts_rejected,rejection_reason\n",
        )
        .unwrap();
        fs::write(
            dir.join(loader::RFQ_FILE),
            "supplier_name,part_description,quote_date,quoted_price\n",
        )
        .unwrap();
        fs::write(
            dir.join(loader::DRAWER_META_FILE),
            "part_number,part_description,complexity_proxy\n",
        )
        .unwrap();
        fs::write(
            dir.join(loader::DRAWER_SIMILARITY_FILE),
            "source_part_number,similar_part_number,similarity_score\n",
        )
        .unwrap();
    }

    #[test]
    fn test_fingerprint_stable_for_same_content() {
        let tmp = tempdir().unwrap();
        write_tables(tmp.path());

        let a = fingerprint(tmp.path()).unwrap();
        let b = fingerprint(tmp.path()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_when_a_table_changes() {
        let tmp = tempdir().unwrap();
        write_tables(tmp.path());
        let before = fingerprint(tmp.path()).unwrap();

        fs::write(
            tmp.path().join(loader::DRAWER_SIMILARITY_FILE),
            "source_part_number,similar_part_number,similarity_score\nHX-100,HX-110,0.97\n",
        )
        .unwrap();
        let after = fingerprint(tmp.path()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_fingerprint_missing_table_is_fatal() {
        let tmp = tempdir().unwrap();
        write_tables(tmp.path());
        fs::remove_file(tmp.path().join(loader::RFQ_FILE)).unwrap();

        assert!(matches!(
            fingerprint(tmp.path()),
            Err(LoadError::MissingTable { .. })
        ));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let tmp = tempdir().unwrap();
        write_tables(tmp.path());

        let dataset = build(tmp.path()).unwrap();
        let path = tmp.path().join("snapshot.json");
        write_snapshot(&path, &dataset);

        let restored = read_snapshot(&path).unwrap();
        assert_eq!(restored.orders.len(), dataset.orders.len());
        assert_eq!(restored.master.len(), dataset.master.len());
        assert_eq!(restored.orders[0].supplier_norm, "ACME");
    }

    #[test]
    fn test_read_snapshot_tolerates_garbage() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("snapshot.json");
        fs::write(&path, "not json").unwrap();
        assert!(read_snapshot(&path).is_none());
    }
}
