//! Common utility functions shared across the codebase.

use std::path::Path;

/// Relative path of `path` under `base`, with `/` separators, lowercased.
///
/// Used both for exclusion matching and as the sort key that defines the
/// order in which source files (and therefore keys) are discovered.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use locsync::utils::normalize_relative_path;
///
/// let base = Path::new("/project/public");
/// assert_eq!(
///     normalize_relative_path(Path::new("/project/public/Scripts/App.js"), base),
///     "scripts/app.js"
/// );
/// assert_eq!(normalize_relative_path(base, base), "");
/// ```
pub fn normalize_relative_path(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let normalized = relative.to_string_lossy().replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_lowercase()
}

/// Path for display: `./relative` when under the working directory, as-is otherwise.
pub fn format_display_path(path: &Path) -> String {
    let display = if path.is_absolute() {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(|rel| format!("./{}", rel.display()))
    } else if path.starts_with(".") || path.starts_with("..") {
        None
    } else {
        Some(format!("./{}", path.display()))
    };

    display
        .unwrap_or_else(|| path.display().to_string())
        .replace('\\', "/")
}

/// Locale code of a localization file: its file name up to the first dot.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use locsync::utils::locale_of;
///
/// assert_eq!(locale_of(Path::new("public/locales/zh-tw.json")), "zh-tw");
/// assert_eq!(locale_of(Path::new("fr.backup.json")), "fr");
/// ```
pub fn locale_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(String::from))
        .unwrap_or_default()
}
