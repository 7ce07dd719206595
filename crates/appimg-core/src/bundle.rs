use std::path::{Path, PathBuf};

use crate::AppImgError;

/// Substring of an executable path that marks a registration as one of ours.
pub const MANAGED_MARKER: &str = ".AppImage";

/// An installable bundle: where it came from, where it is stored, and the
/// name every derived artifact falls back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    source_path: PathBuf,
    stored_path: PathBuf,
    base_name: String,
}

impl Bundle {
    pub fn new(source_path: impl Into<PathBuf>, storage_dir: &Path) -> Result<Self, AppImgError> {
        let source_path = source_path.into();
        let Some(file_name) = source_path.file_name().filter(|name| !name.is_empty()) else {
            return Err(AppImgError::NotFound { path: source_path });
        };
        let stored_path = storage_dir.join(file_name);
        let base_name = Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string_lossy().into_owned());

        Ok(Self {
            source_path,
            stored_path,
            base_name,
        })
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn stored_path(&self) -> &Path {
        &self.stored_path
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }
}
