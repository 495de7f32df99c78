//! Reconciling a localization file with the keys found in source.

use std::ops::AddAssign;

use crate::core::{KeyCatalog, LocaleFile};
use crate::translate::LocaleTranslator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Insert keys found in source but missing from the file.
    pub auto_add: bool,
    /// Fill inserted keys through the translation service.
    pub auto_translate: bool,
    /// Delete keys no longer referenced in source.
    pub auto_remove: bool,
    /// Reorder keys to match discovery order.
    pub sort_keys: bool,
    /// Use the source text instead of an empty string for inserted keys.
    pub fill_with_defaults: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub not_found: usize,
    pub added: usize,
    pub extra: usize,
    pub removed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl AddAssign for SyncStats {
    fn add_assign(&mut self, other: Self) {
        self.not_found += other.not_found;
        self.added += other.added;
        self.extra += other.extra;
        self.removed += other.removed;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

/// Something the synchronizer found or did, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    NotFound { key: String },
    Added { key: String, translated: bool },
    TranslationFailed { key: String, error: String },
    Extra { key: String },
    Removed { key: String },
}

#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub stats: SyncStats,
    pub events: Vec<SyncEvent>,
}

impl SyncOutcome {
    pub(crate) fn record(&mut self, event: SyncEvent) {
        match &event {
            SyncEvent::NotFound { .. } => self.stats.not_found += 1,
            SyncEvent::Added { .. } => self.stats.added += 1,
            SyncEvent::TranslationFailed { .. } => {
                self.stats.skipped += 1;
                self.stats.errors += 1;
            }
            SyncEvent::Extra { .. } => self.stats.extra += 1,
            SyncEvent::Removed { .. } => self.stats.removed += 1,
        }
        self.events.push(event);
    }
}

/// Align `file` with `catalog` according to `options`.
///
/// Keys present on both sides are never modified. `translator` is consulted
/// only for keys inserted by this call, and only with `auto_translate` set;
/// a failed translation leaves the placeholder value in place.
pub fn synchronize(
    file: &mut LocaleFile,
    catalog: &KeyCatalog,
    options: &SyncOptions,
    mut translator: Option<&mut LocaleTranslator<'_>>,
) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();

    for entry in catalog.iter() {
        if file.contains(&entry.key) {
            continue;
        }
        outcome.record(SyncEvent::NotFound {
            key: entry.key.clone(),
        });
        if !options.auto_add {
            continue;
        }

        let placeholder = if options.fill_with_defaults {
            entry.default_text.as_str()
        } else {
            ""
        };
        let mut translated = false;
        let mut value = placeholder.to_string();

        if let Some(translator) = translator.as_deref_mut().filter(|_| options.auto_translate) {
            let source_text = if entry.default_text.is_empty() {
                &entry.key
            } else {
                &entry.default_text
            };
            match translator.translate(source_text) {
                Ok(text) => {
                    value = text;
                    translated = true;
                }
                Err(err) => outcome.record(SyncEvent::TranslationFailed {
                    key: entry.key.clone(),
                    error: err.to_string(),
                }),
            }
        }

        file.insert(entry.key.clone(), value);
        outcome.record(SyncEvent::Added {
            key: entry.key.clone(),
            translated,
        });
    }

    let extra: Vec<String> = file
        .keys()
        .filter(|key| !catalog.contains(key))
        .map(String::from)
        .collect();
    for key in extra {
        outcome.record(SyncEvent::Extra { key: key.clone() });
        if options.auto_remove {
            file.remove(&key);
            outcome.record(SyncEvent::Removed { key });
        }
    }

    if options.sort_keys {
        sort_keys(file, catalog);
    }

    outcome
}

/// Order keys by first discovery in source; unknown keys go last, in their current order.
pub fn sort_keys(file: &mut LocaleFile, catalog: &KeyCatalog) {
    file.sort_by_key(|key| match catalog.position(key) {
        Some(pos) => (0, pos),
        None => (1, 0),
    });
}
