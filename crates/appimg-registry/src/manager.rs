use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use appimg_core::{AppImgError, RegistrationRecord};
use appimg_installer::{remove_file_if_exists, AppLayout};
use log::debug;

use crate::scan::load_managed_records;

/// Addresses one managed record, either by list position or by record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Id(String),
}

impl Selector {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Id(raw.to_string()),
        }
    }
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Id(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStatus {
    Removed,
    Missing,
    Failed,
    /// The reference is not an absolute path, so it names no file we own.
    Skipped,
}

impl RemovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Removed => "deleted",
            Self::Missing => "missing",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRemoval {
    pub path: PathBuf,
    pub status: RemovalStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub record: RegistrationRecord,
    pub removals: Vec<FileRemoval>,
}

impl DeleteReport {
    pub fn failed_paths(&self) -> Vec<PathBuf> {
        self.removals
            .iter()
            .filter(|removal| removal.status == RemovalStatus::Failed)
            .map(|removal| removal.path.clone())
            .collect()
    }

    /// `PartialDeleteFailure` when at least one removal failed.
    pub fn failure(&self) -> Option<AppImgError> {
        let failed = self.failed_paths();
        if failed.is_empty() {
            return None;
        }
        Some(AppImgError::PartialDeleteFailure { failed })
    }
}

/// The managed set: registration records that point at stored bundles,
/// in registration-file path order.
#[derive(Debug, Clone)]
pub struct Manager {
    applications_dir: PathBuf,
    records: Vec<RegistrationRecord>,
}

impl Manager {
    pub fn open(applications_dir: impl Into<PathBuf>) -> Self {
        let mut manager = Self {
            applications_dir: applications_dir.into(),
            records: Vec::new(),
        };
        manager.refresh();
        manager
    }

    pub fn from_layout(layout: &AppLayout) -> Self {
        Self::open(layout.applications_dir())
    }

    pub fn applications_dir(&self) -> &Path {
        &self.applications_dir
    }

    pub fn refresh(&mut self) {
        self.records = load_managed_records(&self.applications_dir);
        debug!(
            "managed set has {} record(s) under {}",
            self.records.len(),
            self.applications_dir.display()
        );
    }

    pub fn records(&self) -> &[RegistrationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn list(&self) -> Vec<(usize, String)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (index, record.display_name.clone()))
            .collect()
    }

    pub fn get(&self, index: usize) -> Result<&RegistrationRecord, AppImgError> {
        self.records
            .get(index)
            .ok_or_else(|| self.invalid(index.to_string()))
    }

    /// An id selector must match exactly one record.
    pub fn resolve(&self, selector: &Selector) -> Result<usize, AppImgError> {
        match selector {
            Selector::Index(index) if *index < self.records.len() => Ok(*index),
            Selector::Index(index) => Err(self.invalid(index.to_string())),
            Selector::Id(id) => {
                let mut matches = self
                    .records
                    .iter()
                    .enumerate()
                    .filter(|(_, record)| record.id().matches(id))
                    .map(|(index, _)| index);
                match (matches.next(), matches.next()) {
                    (Some(index), None) => Ok(index),
                    _ => Err(self.invalid(id.clone())),
                }
            }
        }
    }

    pub fn show(&self, index: usize) -> Result<String, AppImgError> {
        self.get(index).map(ToString::to_string)
    }

    /// Removes the bundle, its registration file and, unless it is empty or
    /// the fallback name, its icon. Bundle and icon references that are not
    /// absolute paths are skipped. Every removal is attempted; failures are
    /// collected in the report. The managed set is re-scanned afterwards, so
    /// later indices shift down.
    pub fn delete(&mut self, index: usize) -> Result<DeleteReport, AppImgError> {
        let record = self.get(index)?.clone();

        let mut removals = vec![
            remove_referenced_file(&record.executable_path),
            remove_target(record.record_path.clone()),
        ];
        if record.has_removable_icon() {
            removals.push(remove_referenced_file(&record.icon_reference));
        }
        self.refresh();

        Ok(DeleteReport { record, removals })
    }

    fn invalid(&self, selector: String) -> AppImgError {
        AppImgError::InvalidIndex {
            selector,
            len: self.records.len(),
        }
    }
}

/// Theme icon names and bare commands would resolve against the working
/// directory; only absolute references are removed.
fn remove_referenced_file(reference: &str) -> FileRemoval {
    let path = PathBuf::from(reference);
    if !path.is_absolute() {
        debug!("skipping non-absolute reference '{reference}'");
        return FileRemoval {
            path,
            status: RemovalStatus::Skipped,
            error: None,
        };
    }
    remove_target(path)
}

fn remove_target(path: PathBuf) -> FileRemoval {
    match remove_file_if_exists(&path) {
        Ok(true) => FileRemoval {
            path,
            status: RemovalStatus::Removed,
            error: None,
        },
        Ok(false) => FileRemoval {
            path,
            status: RemovalStatus::Missing,
            error: None,
        },
        Err(err) => FileRemoval {
            path,
            status: RemovalStatus::Failed,
            error: Some(err.to_string()),
        },
    }
}
