mod manager;
mod scan;

pub use manager::{DeleteReport, FileRemoval, Manager, RemovalStatus, Selector};
pub use scan::{load_managed_records, load_record, scan_registration_files};
