use std::path::PathBuf;

use thiserror::Error;

/// Failure kinds surfaced to the user. Each kind maps to its own process exit code.
#[derive(Debug, Error)]
pub enum AppImgError {
    #[error("bundle '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to extract bundle '{}': {reason}", bundle.display())]
    ExtractionFailed { bundle: PathBuf, reason: String },

    #[error("invalid index '{selector}' ({len} managed bundle(s) installed)")]
    InvalidIndex { selector: String, len: usize },

    #[error("failed to remove {} file(s): {}", failed.len(), join_paths(failed))]
    PartialDeleteFailure { failed: Vec<PathBuf> },
}

impl AppImgError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 3,
            Self::ExtractionFailed { .. } => 4,
            Self::InvalidIndex { .. } => 5,
            Self::PartialDeleteFailure { .. } => 6,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not-found",
            Self::ExtractionFailed { .. } => "extraction-failed",
            Self::InvalidIndex { .. } => "invalid-index",
            Self::PartialDeleteFailure { .. } => "partial-delete-failure",
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
