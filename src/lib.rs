//! locsync - keep web frontend i18n JSON files in sync with the source tree
//!
//! locsync scans HTML and script files for localization keys (`data-i18n`
//! attributes, `t` tagged templates, `translate(...)` calls and friends),
//! compares them with a flat key→string JSON file, and can add missing keys,
//! machine-translate them, drop stale ones and reorder the file to follow
//! the source.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, run pipeline, output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, key extraction, localization files, reconciliation and
//!   Chinese script cross-fill
//! - `translate`: Translation service interface and HTTP client
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod translate;
pub mod utils;
