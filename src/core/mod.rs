//! The synchronization pipeline, without any terminal output of its own
//! beyond scan warnings.
//!
//! 1. [`scan_files`] lists source files in tree order
//! 2. [`extract_files`] builds the [`KeyCatalog`]
//! 3. [`LocaleFile::load`] reads a localization file
//! 4. [`synchronize`] reconciles it with the catalog
//! 5. [`LocaleFile::save`] writes it back

mod catalog;
pub mod chinese;
pub mod extract;
mod scanner;
mod store;
mod sync;

pub use catalog::{KeyCatalog, KeyEntry};
pub use extract::{ExtractResult, ExtractWarning, extract_files, extract_source};
pub use scanner::{ScanResult, ScanRules, scan_files};
pub use store::{LocaleFile, StoreError};
pub use sync::{SyncEvent, SyncOptions, SyncOutcome, SyncStats, sort_keys, synchronize};
