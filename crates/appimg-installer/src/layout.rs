use anyhow::{Context, Result};
use appimg_core::DESKTOP_SUFFIX;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{default_config_path, LayoutConfig};

/// The three directories this tool writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    storage_dir: PathBuf,
    applications_dir: PathBuf,
    icons_dir: PathBuf,
}

impl AppLayout {
    pub fn new(
        storage_dir: impl Into<PathBuf>,
        applications_dir: impl Into<PathBuf>,
        icons_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            applications_dir: applications_dir.into(),
            icons_dir: icons_dir.into(),
        }
    }

    /// Well-known locations below `home` and the user data directory.
    pub fn from_dirs(home: &Path, data_dir: &Path) -> Self {
        Self::new(
            home.join("appimages"),
            data_dir.join("applications"),
            data_dir.join("icons"),
        )
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn applications_dir(&self) -> &Path {
        &self.applications_dir
    }

    pub fn icons_dir(&self) -> &Path {
        &self.icons_dir
    }

    pub fn record_path(&self, display_name: &str) -> PathBuf {
        self.applications_dir
            .join(format!("{display_name}{DESKTOP_SUFFIX}"))
    }

    pub fn icon_path(&self, file_name: &std::ffi::OsStr) -> PathBuf {
        self.icons_dir.join(file_name)
    }

    pub fn ensure_base_dirs(&self) -> Result<()> {
        for dir in [&self.icons_dir, &self.storage_dir, &self.applications_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Layout from defaults, the optional config file and `APPIMG_*_DIR` overrides.
pub fn default_layout() -> Result<AppLayout> {
    let home = dirs::home_dir().context("home directory is unknown; cannot resolve layout")?;
    let data_dir = dirs::data_dir().unwrap_or_else(|| home.join(".local").join("share"));
    let config = match default_config_path() {
        Some(path) => LayoutConfig::load(&path)?,
        None => LayoutConfig::default(),
    };
    Ok(config.resolve(&home, &data_dir, |key| std::env::var(key).ok()))
}
