use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::utils::normalize_relative_path;

/// Result of scanning files.
pub struct ScanResult {
    /// Source files in tree order (sorted by normalized relative path).
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Which files under the scan root take part in extraction.
pub struct ScanRules {
    extensions: Vec<String>,
    ignore_segments: Vec<String>,
    ignore_prefixes: Vec<String>,
    ignore_patterns: Vec<Pattern>,
}

impl ScanRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            ignore_segments: config
                .ignore_segments
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            ignore_prefixes: config
                .ignore_prefixes
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            // Patterns were validated when the config was loaded.
            ignore_patterns: config
                .ignores
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }

    /// Whether a normalized relative path is excluded from the scan.
    pub fn is_excluded(&self, relative: &str) -> bool {
        if relative.is_empty() || relative == "." {
            return false;
        }

        if relative
            .split('/')
            .filter(|s| !s.is_empty())
            .any(|segment| self.ignore_segments.iter().any(|s| s == segment))
        {
            return true;
        }

        if self.ignore_prefixes.iter().any(|prefix| {
            relative == prefix.trim_end_matches('/') || relative.starts_with(prefix.as_str())
        }) {
            return true;
        }

        self.ignore_patterns.iter().any(|p| p.matches(relative))
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
    }
}

/// Walk `base_dir` for source files.
///
/// Entries below the root that cannot be read are skipped with a warning and
/// counted in `skipped_count`. An unreadable root is an error.
pub fn scan_files(base_dir: &Path, rules: &ScanRules, verbose: bool) -> Result<ScanResult> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(base_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_entry(entry, base_dir, rules));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                if e.depth() == 0 {
                    bail!("Cannot scan directory '{}': {}", base_dir.display(), e);
                }
                skipped_count += 1;
                eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                continue;
            }
        };
        if verbose && entry.file_type().is_dir() && entry.depth() > 0 {
            eprintln!(
                "{} {}/",
                "walk:".dimmed(),
                normalize_relative_path(entry.path(), base_dir)
            );
        }

        let path = entry.path();
        if entry.file_type().is_file() && rules.is_source_file(path) {
            files.push((normalize_relative_path(path, base_dir), path.to_path_buf()));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(ScanResult {
        files: files.into_iter().map(|(_, path)| path).collect(),
        skipped_count,
    })
}

fn is_excluded_entry(entry: &DirEntry, base_dir: &Path, rules: &ScanRules) -> bool {
    entry.depth() > 0 && rules.is_excluded(&normalize_relative_path(entry.path(), base_dir))
}
