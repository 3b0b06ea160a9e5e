//! Annotation decision
//!
//! Given a word the scanner just closed, decide what goes into the output in
//! its place. Common, ignored, already explained and unresolvable words come
//! back unchanged; everything else is emphasised and either expanded inline
//! (acronyms) or followed by a footnote.

use super::acronym::{expand_acronym, is_acronym};
use super::formatting::{inline_expansion, with_footnote};
use super::AnnotateOptions;
use crate::events::{AnnotationStyle, Event, EventSink};
use crate::ignore::IgnoreSet;
use crate::lookup::{DescriptionResolver, FrequencyOracle, Resolution};
use crate::store::DefinitionStore;
use std::collections::HashSet;

/// Words explained so far in this run, case-folded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExplainedWords {
    words: HashSet<String>,
}

impl ExplainedWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
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

/// Mutable state owned by a single run.
#[derive(Debug, Default)]
pub struct RunState {
    pub store: DefinitionStore,
    pub explained: ExplainedWords,
    /// Words whose lookup already came back empty in this run
    unresolved: HashSet<String>,
    pub annotated: usize,
    pub harvested: usize,
}

impl RunState {
    pub fn new(store: DefinitionStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn into_store(self) -> DefinitionStore {
        self.store
    }
}

pub struct Annotator<'a> {
    options: &'a AnnotateOptions,
    oracle: &'a dyn FrequencyOracle,
    ignore: &'a IgnoreSet,
    resolver: DescriptionResolver<'a>,
    events: &'a dyn EventSink,
}

impl<'a> Annotator<'a> {
    pub fn new(
        options: &'a AnnotateOptions,
        oracle: &'a dyn FrequencyOracle,
        ignore: &'a IgnoreSet,
        resolver: DescriptionResolver<'a>,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            options,
            oracle,
            ignore,
            resolver,
            events,
        }
    }

    pub fn options(&self) -> &AnnotateOptions {
        self.options
    }

    pub fn events(&self) -> &dyn EventSink {
        self.events
    }

    /// Text to emit in place of `word`, found on 1-based line `line`.
    pub fn annotate(&self, word: &str, line: usize, state: &mut RunState) -> String {
        if self.oracle.frequency(word) > self.options.freq_cutoff {
            return word.to_string();
        }
        let folded = word.to_lowercase();
        if state.explained.contains(&folded)
            || self.ignore.contains(&folded)
            || state.unresolved.contains(&folded)
        {
            return word.to_string();
        }

        let description = match self.resolver.resolve(word, &mut state.store) {
            Resolution::Stored(text) | Resolution::Fetched(text) => text,
            Resolution::Failed(reason) => {
                self.events.emit(Event::LookupFailed {
                    word: word.to_string(),
                    reason,
                });
                state.unresolved.insert(folded);
                return word.to_string();
            }
            Resolution::NotFound | Resolution::Disabled => {
                self.events.emit(Event::LookupMiss {
                    word: word.to_string(),
                });
                state.unresolved.insert(folded);
                return word.to_string();
            }
        };

        // Low-confidence match, e.g. a search hit about something else
        if !description.contains(word) {
            self.events.emit(Event::DescriptionMismatch {
                word: word.to_string(),
            });
            return word.to_string();
        }

        let emphasis = self.options.emphasis;
        let expansion = if is_acronym(word) {
            expand_acronym(word, &description)
        } else {
            None
        };
        let (rendered, style) = match expansion {
            Some(expansion) => (
                emphasis.apply(&inline_expansion(&expansion, word)),
                AnnotationStyle::Expansion,
            ),
            None => (
                with_footnote(&emphasis.apply(word), &description),
                AnnotationStyle::Footnote,
            ),
        };

        state.explained.insert(&folded);
        state.annotated += 1;
        self.events.emit(Event::Annotated {
            line,
            word: word.to_string(),
            style,
        });
        rendered
    }
}
