//! Ignore set
//!
//! Words listed here are never annotated. The bundled list is always loaded
//! and an optional user list is merged on top before the run starts.

use crate::error::{DescyError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUNDLED_IGNORE_LIST: &str = include_str!("../data/ignore.txt");

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    words: HashSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list shipped with descy.
    pub fn bundled() -> Self {
        let mut set = Self::new();
        set.extend_from_str(BUNDLED_IGNORE_LIST);
        set
    }

    /// Merge an ignore list file into the set.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|source| DescyError::IgnoreList {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_str(&text);
        Ok(())
    }

    /// Merge whitespace-separated tokens; `#` lines are comments.
    pub fn extend_from_str(&mut self, text: &str) {
        let tokens = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace);
        self.words.extend(tokens.map(str::to_lowercase));
    }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}
