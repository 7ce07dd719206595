use anyhow::{anyhow, Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::AppLayout;

const ICON_THEME_ROOTS: [&str; 2] = ["usr/share/icons/hicolor", "usr/bin/share/icons/hicolor"];
const ICON_SIZES: [&str; 4] = ["1024x1024", "512x512", "256x256", "scalable"];

/// Candidate icon directories in preference order: the tree root, then each
/// hicolor size (largest first) under both install layouts.
pub fn icon_search_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![root.to_path_buf()];
    for theme_root in ICON_THEME_ROOTS {
        for size in ICON_SIZES {
            dirs.push(root.join(theme_root).join(size).join("apps"));
        }
    }
    dirs
}

/// PNGs are always accepted; SVGs unless they are tray icons.
pub fn is_acceptable_icon_name(name: &str) -> bool {
    name.ends_with(".png") || (name.ends_with(".svg") && !name.contains("tray"))
}

/// First acceptable icon in the first candidate directory that has one.
/// Order inside a directory is whatever the filesystem enumerates.
pub fn locate_icon(root: &Path) -> Result<Option<PathBuf>> {
    for dir in icon_search_dirs(root) {
        if !dir.is_dir() {
            continue;
        }
        for entry in
            fs::read_dir(&dir).with_context(|| format!("failed to read {}", dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if is_acceptable_icon_name(name) && path.is_file() {
                debug!("selected icon {}", path.display());
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}

/// Copies a located icon into the icon cache under its original file name.
pub fn install_icon(layout: &AppLayout, icon_source: &Path) -> Result<PathBuf> {
    let file_name = icon_source
        .file_name()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("failed to derive icon file name: {}", icon_source.display()))?;
    let destination = layout.icon_path(file_name);
    fs::copy(icon_source, &destination).with_context(|| {
        format!(
            "failed to copy icon from {} to {}",
            icon_source.display(),
            destination.display()
        )
    })?;
    Ok(destination)
}
