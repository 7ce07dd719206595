use anyhow::{Context, Result};
use appimg_core::{synthesize_entry, AppImgError, Bundle, EntryMode, SynthesizedEntry};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::extract::{extract_bundle_with_runner, run_command, ExtractedTree};
use crate::fs_utils::{is_same_file, mark_owner_executable};
use crate::icons::{install_icon, locate_icon};
use crate::AppLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub bundle: Bundle,
    pub record_path: PathBuf,
    pub display_name: String,
    pub icon_path: Option<PathBuf>,
    pub mode: EntryMode,
    pub warnings: Vec<String>,
}

pub fn install_bundle(layout: &AppLayout, source_path: &Path) -> Result<InstallOutcome> {
    install_bundle_with_runner(layout, source_path, run_command)
}

/// Copies the bundle into storage, unpacks it with `run`, and writes its
/// registration record. A failure after the copy leaves the stored bundle in
/// place without a record.
pub fn install_bundle_with_runner<RunCommand>(
    layout: &AppLayout,
    source_path: &Path,
    run: RunCommand,
) -> Result<InstallOutcome>
where
    RunCommand: FnMut(&mut Command, &str) -> Result<()>,
{
    layout.ensure_base_dirs()?;

    if !source_path.is_file() {
        return Err(AppImgError::NotFound {
            path: source_path.to_path_buf(),
        }
        .into());
    }

    let bundle = Bundle::new(source_path, layout.storage_dir())?;
    store_bundle(&bundle)?;
    mark_owner_executable(bundle.stored_path())?;

    let tree = extract_bundle_with_runner(bundle.stored_path(), run)?;
    let synthesized = synthesize_from_tree(layout, &bundle, &tree);
    let released = tree.close();
    let (entry, icon_path, warnings) = synthesized?;
    released?;

    let record_path = layout.record_path(&entry.display_name);
    fs::write(&record_path, entry.text.as_bytes()).with_context(|| {
        format!(
            "failed to write registration record: {}",
            record_path.display()
        )
    })?;
    debug!("wrote registration record {}", record_path.display());

    Ok(InstallOutcome {
        bundle,
        record_path,
        display_name: entry.display_name,
        icon_path,
        mode: entry.mode,
        warnings,
    })
}

fn store_bundle(bundle: &Bundle) -> Result<()> {
    if is_same_file(bundle.source_path(), bundle.stored_path()) {
        debug!(
            "bundle {} is already in storage",
            bundle.stored_path().display()
        );
        return Ok(());
    }

    fs::copy(bundle.source_path(), bundle.stored_path()).with_context(|| {
        format!(
            "failed to copy bundle from {} to {}",
            bundle.source_path().display(),
            bundle.stored_path().display()
        )
    })?;
    Ok(())
}

fn synthesize_from_tree(
    layout: &AppLayout,
    bundle: &Bundle,
    tree: &ExtractedTree,
) -> Result<(SynthesizedEntry, Option<PathBuf>, Vec<String>)> {
    let mut warnings = Vec::new();

    let icon_path = match locate_icon(tree.root())? {
        Some(source) => Some(install_icon(layout, &source)?),
        None => {
            warn!("no icon found in {}", bundle.base_name());
            None
        }
    };

    let manifests = tree.manifests()?;
    if manifests.len() > 1 {
        let message = format!(
            "bundle {} carries {} manifests; using {}",
            bundle.base_name(),
            manifests.len(),
            manifests[0]
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
        warn!("{message}");
        warnings.push(message);
    }

    let manifest = match manifests.first() {
        Some(path) => {
            let raw = fs::read(path)
                .with_context(|| format!("failed to read manifest: {}", path.display()))?;
            Some(String::from_utf8_lossy(&raw).into_owned())
        }
        None => None,
    };

    let entry = synthesize_entry(
        manifest.as_deref(),
        bundle.base_name(),
        bundle.stored_path(),
        icon_path.as_deref(),
    );
    Ok((entry, icon_path, warnings))
}
