//! One `locsync` invocation, end to end.
//!
//! Every target file is loaded before anything is scanned or written, so a
//! malformed file aborts the run without touching the others.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::args::Arguments;
use super::report::{Tag, file_summary, print_events, print_status, totals};
use crate::config::{Config, ConfigLoadResult, load_config};
use crate::core::chinese::{SIMPLIFIED_FILE, TRADITIONAL_FILE, ZhConverter, cross_fill};
use crate::core::{
    KeyCatalog, LocaleFile, ScanRules, SyncOptions, SyncStats, extract_files, scan_files,
    synchronize,
};
use crate::translate::{GoogleTranslator, LocaleTranslator, Translate};
use crate::utils::{format_display_path, locale_of};

/// What a run did.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_updated: usize,
    pub source_files_scanned: usize,
    /// Source files or directories that could not be read or parsed.
    pub sources_skipped: usize,
    pub keys_found: usize,
    pub totals: SyncStats,
}

pub fn run(args: Arguments) -> Result<RunSummary> {
    let directory = scan_root(&args.directory);
    if !directory.is_dir() {
        bail!("Directory '{}' not found.", directory.display());
    }

    let ConfigLoadResult {
        mut config,
        source: config_source,
    } = load_config(&directory)?;
    if let Some(locale) = &args.source_locale {
        config.source_locale = locale.clone();
    }
    if let Some(endpoint) = &args.translate_endpoint {
        config.translate_endpoint = endpoint.clone();
    }
    if args.verbose {
        if let Some(path) = &config_source {
            eprintln!("{} {}", "config:".dimmed(), path.display());
        }
    }

    let locales_dir = directory.join(&config.locales_dir);
    if args.zh_cross_fill {
        return run_zh_cross_fill(&locales_dir);
    }

    let targets = match &args.json {
        Some(json) => vec![resolve_locale_file(json, &locales_dir)?],
        None => {
            print_status(Tag::Run, "Updating all JSON files...");
            list_locale_files(&locales_dir, &config)?
        }
    };
    let mut files = targets
        .iter()
        .map(|path| LocaleFile::load(path))
        .collect::<Result<Vec<_>, _>>()?;

    let scan = scan_files(&directory, &ScanRules::from_config(&config), args.verbose)?;
    let extracted = extract_files(&scan.files, &directory, args.verbose);
    let sources_skipped = scan.skipped_count + extracted.warnings.len();

    let translator = args.auto_translate.then(|| {
        GoogleTranslator::new(
            &config.translate_endpoint,
            &config.source_locale,
            Duration::from_secs(config.translate_timeout_secs),
        )
    });
    let mut options = args.sync_options(config.fill_with_defaults);
    // Keys referenced only by a skipped source would look unused.
    if options.auto_remove && sources_skipped > 0 {
        eprintln!(
            "{} Not removing keys: {} source paths could not be scanned",
            "warning:".bold().yellow(),
            sources_skipped
        );
        options.auto_remove = false;
    }

    let mut summary = RunSummary {
        source_files_scanned: extracted.files_scanned,
        sources_skipped,
        keys_found: extracted.catalog.len(),
        ..Default::default()
    };
    for file in &mut files {
        let translator = translator.as_ref().map(|t| t as &dyn Translate);
        summary.totals += sync_file(file, &extracted.catalog, &options, translator)?;
        summary.files_updated += 1;
    }

    print_status(Tag::Total, &totals(&summary.totals, summary.files_updated));
    print_status(Tag::Done, "Done!");
    Ok(summary)
}

/// Cross-fill and convert the Simplified and Traditional Chinese files.
///
/// Both files are loaded before either is written.
pub fn run_zh_cross_fill(locales_dir: &Path) -> Result<RunSummary> {
    let mut simplified = LocaleFile::load(&locales_dir.join(SIMPLIFIED_FILE))?;
    let mut traditional = LocaleFile::load(&locales_dir.join(TRADITIONAL_FILE))?;

    let (simplified_outcome, traditional_outcome) =
        cross_fill(&mut simplified, &mut traditional, &ZhConverter);

    let mut summary = RunSummary::default();
    for (file, outcome) in [
        (&simplified, simplified_outcome),
        (&traditional, traditional_outcome),
    ] {
        let locale = locale_of(file.path());
        print_status(Tag::File, &locale);
        print_events(&outcome.events);
        file.save()?;
        print_status(
            Tag::Summary,
            &file_summary(&locale, &outcome.stats, &format_display_path(file.path())),
        );
        summary.totals += outcome.stats;
        summary.files_updated += 1;
    }

    print_status(Tag::Total, &totals(&summary.totals, summary.files_updated));
    print_status(Tag::Done, "Done!");
    Ok(summary)
}

/// Reconcile, write and report a single localization file.
pub fn sync_file(
    file: &mut LocaleFile,
    catalog: &KeyCatalog,
    options: &SyncOptions,
    translator: Option<&dyn Translate>,
) -> Result<SyncStats> {
    let locale = locale_of(file.path());
    print_status(Tag::File, &locale);

    let mut locale_translator = translator.map(|t| LocaleTranslator::new(t, &locale));
    let outcome = synchronize(file, catalog, options, locale_translator.as_mut());
    print_events(&outcome.events);

    file.save()?;
    print_status(
        Tag::Summary,
        &file_summary(&locale, &outcome.stats, &format_display_path(file.path())),
    );
    Ok(outcome.stats)
}

/// The scan root for `directory`: a trailing `locales` component is dropped,
/// so pointing at the locales folder scans the site around it.
pub fn scan_root(directory: &Path) -> PathBuf {
    if directory.file_name().is_some_and(|name| name == "locales") {
        match directory.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        directory.to_path_buf()
    }
}

/// Resolve a path or locale code to an existing localization file.
///
/// `.json` is appended when missing. A relative name is looked up in the
/// working directory first, then in `locales_dir`.
pub fn resolve_locale_file(json: &str, locales_dir: &Path) -> Result<PathBuf> {
    let name = if json.ends_with(".json") {
        json.to_string()
    } else {
        format!("{}.json", json)
    };

    let direct = PathBuf::from(&name);
    if direct.is_file() {
        return Ok(direct);
    }
    if direct.is_relative() {
        let in_locales = locales_dir.join(&name);
        if in_locales.is_file() {
            return Ok(in_locales);
        }
    }
    bail!("JSON file '{}' not found.", name)
}

/// Every localization file in `locales_dir` except the source-language and excluded ones.
pub fn list_locale_files(locales_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let source_file = config.source_locale_file();
    let entries = fs::read_dir(locales_dir).with_context(|| {
        format!(
            "Failed to read locales directory: {}",
            locales_dir.display()
        )
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read locales directory: {}", locales_dir.display()))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(".json")
            || name == source_file
            || config.excluded_locale_files.contains(&name)
            || !entry.path().is_file()
        {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}
