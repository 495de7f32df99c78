//! Key extraction from a source tree.
//!
//! HTML files go through the markup extractor; every other source file is
//! parsed as script. Files are visited in scanner order, and the first file
//! to mention a key fixes its position in the resulting catalog.

pub mod markup;
pub mod script;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;

pub use markup::{extract_attribute_value, extract_html, extract_markup_text};
pub use script::extract_script;

use crate::core::KeyCatalog;
use crate::utils::normalize_relative_path;

/// A source file that could not be read or parsed.
#[derive(Debug, Clone)]
pub struct ExtractWarning {
    pub file_path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ExtractResult {
    pub catalog: KeyCatalog,
    pub files_scanned: usize,
    pub warnings: Vec<ExtractWarning>,
}

/// Extract keys from a single file's content, dispatching on its extension.
pub fn extract_source(path: &Path, content: &str) -> Result<KeyCatalog> {
    let is_html = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html"));
    if is_html {
        Ok(extract_html(content))
    } else {
        extract_script(content, path)
    }
}

/// Extract keys from `files`, in order. Unreadable or unparseable files are
/// skipped with a warning.
pub fn extract_files(files: &[PathBuf], base_dir: &Path, verbose: bool) -> ExtractResult {
    let mut result = ExtractResult::default();

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!(
                    "{} Skipping unreadable file {}: {}",
                    "warning:".bold().yellow(),
                    path.display(),
                    err
                );
                result.warnings.push(ExtractWarning {
                    file_path: path.clone(),
                    error: err.to_string(),
                });
                continue;
            }
        };

        let catalog = match extract_source(path, &content) {
            Ok(catalog) => catalog,
            Err(err) => {
                eprintln!(
                    "{} Skipping unparseable file {}: {:#}",
                    "warning:".bold().yellow(),
                    path.display(),
                    err
                );
                result.warnings.push(ExtractWarning {
                    file_path: path.clone(),
                    error: format!("{:#}", err),
                });
                continue;
            }
        };
        if verbose && !catalog.is_empty() {
            eprintln!(
                "{} {} ({} keys)",
                "scan:".dimmed(),
                normalize_relative_path(path, base_dir),
                catalog.len()
            );
        }
        result.catalog.extend(catalog);
        result.files_scanned += 1;
    }

    result
}
