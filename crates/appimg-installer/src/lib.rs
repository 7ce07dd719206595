mod config;
mod extract;
mod fs_utils;
mod icons;
mod install;
mod layout;

pub use config::{default_config_path, LayoutConfig, CONFIG_ENV};
pub use extract::{
    build_extract_command, extract_bundle, extract_bundle_with_runner, run_command,
    ExtractedTree, EXTRACTED_ROOT_DIR,
};
pub use fs_utils::{mark_owner_executable, remove_file_if_exists};
pub use icons::{icon_search_dirs, install_icon, is_acceptable_icon_name, locate_icon};
pub use install::{install_bundle, install_bundle_with_runner, InstallOutcome};
pub use layout::{default_layout, AppLayout};
