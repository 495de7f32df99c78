use std::collections::HashMap;

/// A key discovered in source, with the source-language text found next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    /// Element text, attribute value or call argument that accompanied the key.
    /// Empty when the reference carried no usable text.
    pub default_text: String,
}

/// Ordered, duplicate-free set of extracted keys.
///
/// Keys keep the position of their first occurrence. Later occurrences can
/// only fill in a missing default text, never move the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCatalog {
    entries: Vec<KeyEntry>,
    index: HashMap<String, usize>,
}

impl KeyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`, replacing its default text if it is already known.
    pub fn insert(&mut self, key: impl Into<String>, default_text: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        let default_text = default_text.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].default_text = default_text,
            None => self.push(key, default_text),
        }
    }

    /// Record `key`, keeping an existing non-empty default text.
    pub fn merge(&mut self, key: impl Into<String>, default_text: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        let default_text = default_text.into();
        match self.index.get(&key) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                if entry.default_text.is_empty() && !default_text.is_empty() {
                    entry.default_text = default_text;
                }
            }
            None => self.push(key, default_text),
        }
    }

    /// Merge every entry of `other`, in its order.
    pub fn extend(&mut self, other: KeyCatalog) {
        for entry in other.entries {
            self.merge(entry.key, entry.default_text);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// First-seen position of `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn default_text(&self, key: &str) -> Option<&str> {
        self.position(key)
            .map(|pos| self.entries[pos].default_text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    fn push(&mut self, key: String, default_text: String) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(KeyEntry { key, default_text });
    }
}
