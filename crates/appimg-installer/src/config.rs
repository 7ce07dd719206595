use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::AppLayout;

/// Points at an alternative config file.
pub const CONFIG_ENV: &str = "APPIMG_CONFIG";

const STORAGE_DIR_ENV: &str = "APPIMG_STORAGE_DIR";
const APPLICATIONS_DIR_ENV: &str = "APPIMG_APPLICATIONS_DIR";
const ICONS_DIR_ENV: &str = "APPIMG_ICONS_DIR";

/// Optional directory overrides read from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    pub storage_dir: Option<String>,
    pub applications_dir: Option<String>,
    pub icons_dir: Option<String>,
}

impl LayoutConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("failed to parse appimg config")
    }

    /// A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Environment wins over the file, the file wins over the defaults.
    pub fn resolve<Env>(&self, home: &Path, data_dir: &Path, env: Env) -> AppLayout
    where
        Env: Fn(&str) -> Option<String>,
    {
        let defaults = AppLayout::from_dirs(home, data_dir);
        let pick = |key: &str, configured: &Option<String>, fallback: &Path| -> PathBuf {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| configured.clone())
                .map(|value| expand_home(&value, home))
                .unwrap_or_else(|| fallback.to_path_buf())
        };

        AppLayout::new(
            pick(STORAGE_DIR_ENV, &self.storage_dir, defaults.storage_dir()),
            pick(
                APPLICATIONS_DIR_ENV,
                &self.applications_dir,
                defaults.applications_dir(),
            ),
            pick(ICONS_DIR_ENV, &self.icons_dir, defaults.icons_dir()),
        )
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("appimg").join("config.toml"))
}

fn expand_home(value: &str, home: &Path) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None if value == "~" => home.to_path_buf(),
        None => PathBuf::from(value),
    }
}
