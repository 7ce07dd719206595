use anyhow::{anyhow, Context, Result};
use appimg_core::{AppImgError, DESKTOP_SUFFIX};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Directory the bundle's self-extraction mode writes into.
pub const EXTRACTED_ROOT_DIR: &str = "squashfs-root";

/// A bundle's contents unpacked into a private temporary directory.
///
/// The directory is removed when this value is dropped or closed.
#[derive(Debug)]
pub struct ExtractedTree {
    root: PathBuf,
    dir: TempDir,
}

impl ExtractedTree {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Manifests at the top of the tree, sorted by file name.
    pub fn manifests(&self) -> Result<Vec<PathBuf>> {
        let mut manifests = Vec::new();
        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("failed to read {}", self.root.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            let is_manifest = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(DESKTOP_SUFFIX));
            if is_manifest && path.is_file() {
                manifests.push(path);
            }
        }
        manifests.sort();
        Ok(manifests)
    }

    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .with_context(|| format!("failed to remove extraction dir: {}", path.display()))
    }
}

pub fn build_extract_command(bundle_path: &Path, work_dir: &Path) -> Command {
    let mut command = Command::new(bundle_path);
    command.arg("--appimage-extract").current_dir(work_dir);
    command
}

pub fn extract_bundle(bundle_path: &Path) -> Result<ExtractedTree> {
    extract_bundle_with_runner(bundle_path, run_command)
}

pub fn extract_bundle_with_runner<RunCommand>(
    bundle_path: &Path,
    mut run: RunCommand,
) -> Result<ExtractedTree>
where
    RunCommand: FnMut(&mut Command, &str) -> Result<()>,
{
    let dir = tempfile::Builder::new()
        .prefix("appimg-extract-")
        .tempdir()
        .context("failed to create extraction dir")?;

    let bundle_path = std::path::absolute(bundle_path)
        .with_context(|| format!("failed to resolve bundle path: {}", bundle_path.display()))?;
    let mut command = build_extract_command(&bundle_path, dir.path());
    debug!("extracting {} into {}", bundle_path.display(), dir.path().display());
    if let Err(err) = run(&mut command, "failed to run bundle self-extraction") {
        let reason = if error_chain_has_not_found(&err) {
            format!("bundle could not be executed ({err:#}); is it a valid AppImage?")
        } else {
            format!("{err:#}")
        };
        return Err(AppImgError::ExtractionFailed {
            bundle: bundle_path.clone(),
            reason,
        }
        .into());
    }

    let root = dir.path().join(EXTRACTED_ROOT_DIR);
    if !root.is_dir() {
        return Err(AppImgError::ExtractionFailed {
            bundle: bundle_path.clone(),
            reason: format!("extraction produced no {EXTRACTED_ROOT_DIR} directory"),
        }
        .into());
    }

    Ok(ExtractedTree { root, dir })
}

pub fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}

fn error_chain_has_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
    })
}
