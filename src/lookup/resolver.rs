//! Description resolution
//!
//! Stored descriptions always win. Only when the store has nothing for a word
//! is the remote source asked; a summary it returns is escaped for LaTeX,
//! quoted and remembered in the store for later occurrences and later runs.

use super::{SummaryOutcome, SummarySource};
use crate::annotation::formatting::escape_latex;
use crate::store::DefinitionStore;

/// Where a description came from, or why there is none
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Stored(String),
    Fetched(String),
    NotFound,
    Failed(String),
    /// Remote lookup is switched off and the store has nothing
    Disabled,
}

impl Resolution {
    pub fn description(&self) -> Option<&str> {
        match self {
            Resolution::Stored(text) | Resolution::Fetched(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
pub struct DescriptionResolver<'a> {
    remote: Option<&'a dyn SummarySource>,
}

impl<'a> DescriptionResolver<'a> {
    pub fn new(remote: Option<&'a dyn SummarySource>) -> Self {
        Self { remote }
    }

    /// Resolver that only consults the store.
    pub fn offline() -> Self {
        Self { remote: None }
    }

    pub fn resolve(&self, word: &str, store: &mut DefinitionStore) -> Resolution {
        if let Some(stored) = store.get(word) {
            return Resolution::Stored(stored.to_string());
        }
        let Some(remote) = self.remote else {
            return Resolution::Disabled;
        };
        match remote.summary(word) {
            SummaryOutcome::Found(summary) if !summary.trim().is_empty() => {
                let description = format!("\"{}\"", escape_latex(summary.trim()));
                store.insert(word, description.clone());
                Resolution::Fetched(description)
            }
            SummaryOutcome::Found(_) | SummaryOutcome::NotFound => Resolution::NotFound,
            SummaryOutcome::Failed(reason) => Resolution::Failed(reason),
        }
    }
}
