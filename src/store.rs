//! Definition store
//!
//! The long-term memory of descy: a mapping from case-folded word to the
//! description used for it. It is loaded once when a run starts, grows while
//! the document is scanned (remote lookups and harvested footnotes) and is
//! dumped as a whole when the run ends.
//!
//! On disk the store is a JSON object of strings, pretty-printed with sorted
//! keys so that it stays diffable and easy to edit by hand.

use crate::error::StoreError;
use crate::events::{Event, EventSink};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionStore {
    entries: BTreeMap<String, String>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a store, degrading to an empty one.
    ///
    /// A missing file is the normal first-run case and is not reported; any
    /// other failure is surfaced as [`Event::StoreLoadFailed`].
    pub fn load_or_default(path: &Path, events: &dyn EventSink) -> Self {
        if !path.exists() {
            return Self::new();
        }
        Self::load(path).unwrap_or_else(|err| {
            events.emit(Event::StoreLoadFailed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            });
            Self::new()
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, String> = serde_json::from_str(text)?;
        Ok(raw.into_iter().collect())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Dump the whole mapping, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut json = self.to_json()?;
        json.push('\n');

        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.persist(path).map_err(|source| StoreError::Persist {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }

    /// Store a description, replacing any previous one for the word.
    pub fn insert(&mut self, word: &str, description: impl Into<String>) -> Option<String> {
        self.entries.insert(word.to_lowercase(), description.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for DefinitionStore {
    /// Keys are case-folded; when two keys fold together the last one wins.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(word, description)| (word.to_lowercase(), description))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;

    #[test]
    fn keys_are_case_folded() {
        let mut store = DefinitionStore::new();
        store.insert("NASA", "the National Aeronautics and Space Administration");
        assert!(store.contains("nasa"));
        assert_eq!(
            store.get("Nasa"),
            Some("the National Aeronautics and Space Administration")
        );
        assert_eq!(store.iter().next().map(|(k, _)| k), Some("nasa"));
    }

    #[test]
    fn insert_overwrites() {
        let mut store = DefinitionStore::new();
        store.insert("word", "old");
        let previous = store.insert("Word", "new");
        assert_eq!(previous.as_deref(), Some("old"));
        assert_eq!(store.get("word"), Some("new"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn loading_folds_keys_from_older_files() {
        let store = DefinitionStore::from_json(r#"{"Perihelion": "closest point"}"#).unwrap();
        assert_eq!(store.get("perihelion"), Some("closest point"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("descriptions.json");

        let mut store = DefinitionStore::new();
        store.insert("zeta", "last");
        store.insert("alpha", "first");
        store.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.find("alpha").unwrap() < text.find("zeta").unwrap());
        assert!(text.ends_with("}\n"));
        assert_eq!(DefinitionStore::load(&path).unwrap(), store);
    }

    #[test]
    fn missing_file_is_silently_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::new();
        let store = DefinitionStore::load_or_default(&dir.path().join("absent.json"), &sink);
        assert!(store.is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn unparsable_file_degrades_with_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let sink = RecordingSink::new();
        let store = DefinitionStore::load_or_default(&path, &sink);
        assert!(store.is_empty());
        assert!(matches!(
            sink.events().as_slice(),
            [Event::StoreLoadFailed { .. }]
        ));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("descriptions.json");
        let err = DefinitionStore::new().save(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
