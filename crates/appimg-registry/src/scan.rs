use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use appimg_core::{RegistrationRecord, DESKTOP_SUFFIX};
use log::{debug, warn};
use walkdir::WalkDir;

/// Every `*.desktop` file below `dir`, sorted by path.
pub fn scan_registration_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {err}", dir.display());
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        let is_record = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(DESKTOP_SUFFIX));
        if is_record {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|left, right| left.to_string_lossy().cmp(&right.to_string_lossy()));
    files
}

pub fn load_record(path: &Path) -> Result<RegistrationRecord> {
    let raw = fs::read(path)
        .with_context(|| format!("failed to read registration record: {}", path.display()))?;
    Ok(RegistrationRecord::parse(&String::from_utf8_lossy(&raw), path))
}

/// Records under `dir` that point at a stored bundle. Foreign launcher
/// entries are left alone and simply not returned.
pub fn load_managed_records(dir: &Path) -> Vec<RegistrationRecord> {
    let mut records = Vec::new();
    for path in scan_registration_files(dir) {
        let record = match load_record(&path) {
            Ok(record) => record,
            Err(err) => {
                warn!("{err:#}");
                continue;
            }
        };
        if record.is_managed() {
            records.push(record);
        } else {
            debug!("ignoring foreign record {}", path.display());
        }
    }
    records
}
