//! Loading and saving localization files.
//!
//! A localization file is a flat JSON object mapping keys to strings. Key
//! order is preserved on load and written back as-is, with 4-space
//! indentation, non-ASCII text unescaped and a trailing newline.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid localization file {}: {reason}", path.display())]
    FileFormat { path: PathBuf, reason: String },
    #[error("Failed to serialize {}: {reason}", path.display())]
    Serialize { path: PathBuf, reason: String },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Key→string mapping for one language, backed by the file it came from.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl LocaleFile {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse `content` as the localization file at `path`.
    pub fn parse(path: &Path, content: &str) -> Result<Self, StoreError> {
        let format_error = |reason: String| StoreError::FileFormat {
            path: path.to_path_buf(),
            reason,
        };

        let value: Value = serde_json::from_str(content).map_err(|e| format_error(e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(format_error("root must be a JSON object".to_string()));
        };
        if let Some((key, _)) = entries.iter().find(|(_, v)| !v.is_string()) {
            return Err(format_error(format!("value of \"{}\" is not a string", key)));
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set `key`, keeping its position if it exists and appending it otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Value::String(value.into()));
    }

    /// Remove `key`, keeping the relative order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        match self.entries.shift_remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap_or_default()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reorder keys by `rank`; equal ranks keep their current relative order.
    pub fn sort_by_key<K: Ord>(&mut self, mut rank: impl FnMut(&str) -> K) {
        let mut entries: Vec<(String, Value)> = std::mem::take(&mut self.entries).into_iter().collect();
        entries.sort_by_cached_key(|(key, _)| rank(key));
        self.entries = entries.into_iter().collect();
    }

    /// Serialize the mapping in the on-disk format.
    pub fn to_json(&self) -> Result<String, StoreError> {
        let serialize_error = |reason: String| StoreError::Serialize {
            path: self.path.clone(),
            reason,
        };

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.entries
            .serialize(&mut serializer)
            .map_err(|e| serialize_error(e.to_string()))?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| serialize_error(e.to_string()))
    }

    /// Rewrite the whole file.
    ///
    /// The content goes to a temporary file next to the target which then
    /// replaces it, so readers never observe a half-written file.
    pub fn save(&self) -> Result<(), StoreError> {
        let write_error = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let content = self.to_json()?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
        tmp.write_all(content.as_bytes())
            .map_err(write_error)?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_error)?;
        }
        tmp.persist(&self.path).map_err(|e| write_error(e.error))?;
        Ok(())
    }
}
