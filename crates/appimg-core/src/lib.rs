mod bundle;
mod entry;
mod error;
mod record;

pub use bundle::{Bundle, MANAGED_MARKER};
pub use entry::{
    derive_display_name, fabricate_manifest, icon_reference, patch_manifest, synthesize_entry,
    EntryMode, SynthesizedEntry, FALLBACK_ICON,
};
pub use error::AppImgError;
pub use record::{RecordId, RegistrationRecord, DESKTOP_SUFFIX};

#[cfg(test)]
mod tests;
