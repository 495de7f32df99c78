use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::Deserialize;

use crate::translate::DEFAULT_ENDPOINT;

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Language the source text is written in.
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    /// Directory holding the localization files, relative to the scan root.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory or file names excluded wherever they appear.
    #[serde(default = "default_ignore_segments")]
    pub ignore_segments: Vec<String>,
    /// Relative path prefixes excluded from the scan.
    #[serde(default = "default_ignore_prefixes")]
    pub ignore_prefixes: Vec<String>,
    /// Glob patterns matched against relative paths.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// File names skipped when every localization file is processed.
    #[serde(default = "default_excluded_locale_files")]
    pub excluded_locale_files: Vec<String>,
    #[serde(default)]
    pub fill_with_defaults: bool,
    #[serde(default = "default_translate_endpoint")]
    pub translate_endpoint: String,
    #[serde(default = "default_translate_timeout_secs")]
    pub translate_timeout_secs: u64,
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_locales_dir() -> String {
    "locales".to_string()
}

fn default_extensions() -> Vec<String> {
    ["html", "js", "mjs", "cjs", "ts", "tsx"]
        .map(String::from)
        .to_vec()
}

fn default_ignore_segments() -> Vec<String> {
    [
        ".git",
        "node_modules",
        "dist",
        "build",
        "coverage",
        "__pycache__",
    ]
    .map(String::from)
    .to_vec()
}

fn default_ignore_prefixes() -> Vec<String> {
    [
        "plugins/",
        "public/plugins/",
        "user/plugins/",
        "extensions/third-party/",
        "scripts/extensions/third-party/",
        "public/scripts/extensions/third-party/",
    ]
    .map(String::from)
    .to_vec()
}

fn default_excluded_locale_files() -> Vec<String> {
    vec!["lang.json".to_string()]
}

fn default_translate_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_translate_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_locale: default_source_locale(),
            locales_dir: default_locales_dir(),
            extensions: default_extensions(),
            ignore_segments: default_ignore_segments(),
            ignore_prefixes: default_ignore_prefixes(),
            ignores: Vec::new(),
            excluded_locale_files: default_excluded_locale_files(),
            fill_with_defaults: false,
            translate_endpoint: default_translate_endpoint(),
            translate_timeout_secs: default_translate_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a
    /// required value is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.source_locale.trim().is_empty() {
            anyhow::bail!("'sourceLocale' must not be empty");
        }
        if self.extensions.is_empty() {
            anyhow::bail!("'extensions' must list at least one file extension");
        }

        Ok(())
    }

    /// File name of the source-language localization file, e.g. `en.json`.
    pub fn source_locale_file(&self) -> String {
        format!("{}.json", self.source_locale)
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the file the config was read from, if any.
    pub source: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                source: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            source: None,
        }),
    }
}
