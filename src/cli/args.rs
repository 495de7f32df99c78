//! CLI argument definitions using clap.
//!
//! The interface is a single command: scan a directory, then reconcile one
//! localization file (or all of them) with the keys found.

use std::path::PathBuf;

use clap::Parser;

use crate::core::SyncOptions;

#[derive(Debug, Parser)]
#[command(author, version, about = "Update or generate i18n JSON files", long_about = None)]
pub struct Arguments {
    /// Localization file path or locale code (e.g. `fr` or `locales/fr.json`).
    /// When omitted, every file in the locales directory is processed
    pub json: Option<String>,

    /// Directory to scan for HTML and script files
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Add keys found in source but missing from the JSON file
    #[arg(long)]
    pub auto_add: bool,

    /// Translate keys when adding them
    #[arg(long)]
    pub auto_translate: bool,

    /// Remove keys no longer referenced in source
    #[arg(long)]
    pub auto_remove: bool,

    /// Sort keys by project tree order (source path + first appearance in file)
    #[arg(long)]
    pub sort_keys: bool,

    /// Copy missing keys between zh-cn.json and zh-tw.json and convert every
    /// value to the file's script, instead of scanning sources
    #[arg(
        long,
        conflicts_with_all = ["json", "auto_add", "auto_translate", "auto_remove", "sort_keys"]
    )]
    pub zh_cross_fill: bool,

    /// Language of the source text (overrides config file)
    #[arg(long, env = "LOCSYNC_SOURCE_LOCALE")]
    pub source_locale: Option<String>,

    /// Translation service endpoint (overrides config file)
    #[arg(long, env = "LOCSYNC_TRANSLATE_ENDPOINT")]
    pub translate_endpoint: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    /// Synchronization flags; `fill_with_defaults` comes from the config file.
    pub fn sync_options(&self, fill_with_defaults: bool) -> SyncOptions {
        SyncOptions {
            auto_add: self.auto_add,
            auto_translate: self.auto_translate,
            auto_remove: self.auto_remove,
            sort_keys: self.sort_keys,
            fill_with_defaults,
        }
    }
}
