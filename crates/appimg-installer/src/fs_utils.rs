use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Returns whether a file was actually removed. A dangling symlink counts as
/// present and is removed.
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    if fs::symlink_metadata(path).is_err() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}

/// Adds owner-execute to the file mode, keeping the other bits.
pub fn mark_owner_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .permissions();
        permissions.set_mode(permissions.mode() | 0o100);
        fs::set_permissions(path, permissions)
            .with_context(|| format!("failed to set executable mode on {}", path.display()))?;
    }
    #[cfg(not(unix))]
    {
        fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
    }
    Ok(())
}

pub(crate) fn is_same_file(left: &Path, right: &Path) -> bool {
    match (fs::canonicalize(left), fs::canonicalize(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}
