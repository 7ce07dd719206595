use std::path::Path;

/// Icon name used when a bundle ships no usable icon file.
pub const FALLBACK_ICON: &str = "application-x-executable";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// The bundle's own manifest was rewritten.
    Patched,
    /// The bundle had no manifest and a minimal one was generated.
    Fabricated,
}

impl EntryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patched => "patched",
            Self::Fabricated => "fabricated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedEntry {
    pub text: String,
    pub display_name: String,
    pub mode: EntryMode,
}

pub fn icon_reference(icon_path: Option<&Path>) -> String {
    icon_path
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| FALLBACK_ICON.to_string())
}

const DESKTOP_ENTRY_HEADER: &str = "[Desktop Entry]";

/// Matches `Name=` the way `RegistrationRecord::parse` reads it.
fn is_name_line(line: &str) -> bool {
    line.trim().starts_with("Name=")
}

/// Points every `Exec=` line at the stored bundle and every `Icon=` line at
/// `icon_ref`. The first `Name=` line is replaced with `display_name`, or one
/// is inserted after the `[Desktop Entry]` header when the manifest has none.
/// All other lines pass through; each line ends with one `\n`.
pub fn patch_manifest(raw: &str, display_name: &str, exec_path: &Path, icon_ref: &str) -> String {
    let name_line = format!("Name={display_name}");
    let needs_name = !raw.lines().any(is_name_line);
    let mut name_pending = true;
    let mut patched = String::with_capacity(raw.len() + 64);

    if needs_name && !raw.lines().any(|line| line.trim() == DESKTOP_ENTRY_HEADER) {
        patched.push_str(&name_line);
        patched.push('\n');
        name_pending = false;
    }

    for line in raw.lines() {
        if line.starts_with("Exec=") {
            patched.push_str(&format!("Exec={}", exec_path.display()));
        } else if line.starts_with("Icon=") {
            patched.push_str(&format!("Icon={icon_ref}"));
        } else if name_pending && is_name_line(line) {
            patched.push_str(&name_line);
            name_pending = false;
        } else {
            patched.push_str(line);
        }
        patched.push('\n');

        if needs_name && name_pending && line.trim() == DESKTOP_ENTRY_HEADER {
            patched.push_str(&name_line);
            patched.push('\n');
            name_pending = false;
        }
    }
    patched
}

pub fn fabricate_manifest(display_name: &str, exec_path: &Path, icon_ref: &str) -> String {
    let mut desktop = String::new();
    desktop.push_str(DESKTOP_ENTRY_HEADER);
    desktop.push('\n');
    desktop.push_str(&format!("Name={display_name}\n"));
    desktop.push_str(&format!("Exec={}\n", exec_path.display()));
    desktop.push_str(&format!("Icon={icon_ref}\n"));
    desktop.push_str("Type=Application\n");
    desktop.push_str("Categories=Utility;\n");
    desktop
}

/// Name used for the registration file and written back as its `Name=`: the
/// first `Name=` value, or `base_name` when that value is missing or blank.
/// Surrounding whitespace is dropped and path separators are flattened so
/// the result is always a single file name component.
pub fn derive_display_name(text: &str, base_name: &str) -> String {
    let name = text
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("Name="))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| base_name.trim());
    name.replace('/', "-")
}

pub fn synthesize_entry(
    manifest: Option<&str>,
    base_name: &str,
    exec_path: &Path,
    icon_path: Option<&Path>,
) -> SynthesizedEntry {
    let icon_ref = icon_reference(icon_path);
    let display_name = derive_display_name(manifest.unwrap_or_default(), base_name);
    let (text, mode) = match manifest {
        Some(raw) => (
            patch_manifest(raw, &display_name, exec_path, &icon_ref),
            EntryMode::Patched,
        ),
        None => (
            fabricate_manifest(&display_name, exec_path, &icon_ref),
            EntryMode::Fabricated,
        ),
    };

    SynthesizedEntry {
        text,
        display_name,
        mode,
    }
}
