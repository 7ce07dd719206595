use std::fmt;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::{FALLBACK_ICON, MANAGED_MARKER};

pub const DESKTOP_SUFFIX: &str = ".desktop";

const RECORD_ID_LEN: usize = 12;
const MIN_ID_PREFIX_LEN: usize = 4;

/// One launcher entry as read back from a registration file.
///
/// Built once per parse and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub executable_path: String,
    pub display_name: String,
    pub icon_reference: String,
    pub record_path: PathBuf,
}

impl RegistrationRecord {
    /// Reads `Name=`, `Exec=` and `Icon=` from a key=value record.
    ///
    /// The first occurrence of each key wins and later duplicates are ignored.
    /// Only the command token of `Exec=` is kept. Missing keys leave the field
    /// empty; this never fails.
    pub fn parse(raw: &str, record_path: impl Into<PathBuf>) -> Self {
        let mut display_name = None;
        let mut executable_path = None;
        let mut icon_reference = None;

        for line in raw.lines().map(str::trim) {
            if let Some(value) = line.strip_prefix("Name=") {
                display_name.get_or_insert_with(|| value.to_string());
            } else if let Some(value) = line.strip_prefix("Exec=") {
                let command = value.split_whitespace().next().unwrap_or("");
                executable_path.get_or_insert_with(|| command.to_string());
            } else if let Some(value) = line.strip_prefix("Icon=") {
                icon_reference.get_or_insert_with(|| value.to_string());
            }
        }

        Self {
            executable_path: executable_path.unwrap_or_default(),
            display_name: display_name.unwrap_or_default(),
            icon_reference: icon_reference.unwrap_or_default(),
            record_path: record_path.into(),
        }
    }

    pub fn id(&self) -> RecordId {
        RecordId::for_path(&self.record_path)
    }

    pub fn is_managed(&self) -> bool {
        self.executable_path.contains(MANAGED_MARKER)
    }

    /// False for an empty icon or the symbolic fallback, which are not files we own.
    pub fn has_removable_icon(&self) -> bool {
        !self.icon_reference.is_empty() && self.icon_reference != FALLBACK_ICON
    }
}

impl fmt::Display for RegistrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.display_name)?;
        writeln!(f, "Exec: {}", self.executable_path)?;
        writeln!(f, "Icon: {}", self.icon_reference)?;
        writeln!(f, "Desktop: {}", self.record_path.display())?;
        write!(f, "Id: {}", self.id())
    }
}

/// Stable identifier of a registration, derived from its backing file path.
///
/// Unlike list indices it does not shift when other entries are removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn for_path(path: &Path) -> Self {
        let digest = Sha256::digest(path.to_string_lossy().as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(RECORD_ID_LEN);
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts the full id or an unambiguous-looking prefix of it.
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.trim().to_ascii_lowercase();
        candidate.len() >= MIN_ID_PREFIX_LEN && self.0.starts_with(&candidate)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
