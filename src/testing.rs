//! Testing utilities
//!
//! Doubles for the collaborators of a run, so that scanner and runner tests
//! never touch the network:
//!
//! - [`RecordingSink`] keeps every emitted event for later assertions
//! - [`StaticSummaries`] answers summary requests from a fixed table
//! - [`common_words`] is a frequency oracle where only a handful of words are
//!   rare
//!
//! Sample documents live in `docs/samples/` and are read with
//! [`Samples::get_string`] instead of being pasted into tests.

use crate::events::{Event, EventSink};
use crate::lookup::{SummaryOutcome, SummarySource};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

/// Summary source backed by a map. Counts how often it was asked.
#[derive(Debug, Default)]
pub struct StaticSummaries {
    summaries: HashMap<String, String>,
    failure: Option<String>,
    calls: Cell<usize>,
}

impl StaticSummaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: &str, summary: &str) -> Self {
        self.summaries.insert(word.to_string(), summary.to_string());
        self
    }

    /// Every request fails with `reason`.
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl SummarySource for StaticSummaries {
    fn summary(&self, word: &str) -> SummaryOutcome {
        self.calls.set(self.calls.get() + 1);
        if let Some(reason) = &self.failure {
            return SummaryOutcome::Failed(reason.clone());
        }
        match self.summaries.get(word) {
            Some(summary) => SummaryOutcome::Found(summary.clone()),
            None => SummaryOutcome::NotFound,
        }
    }
}

/// Words [`common_words`] scores as rare.
pub const RARE_WORDS: &[&str] = &[
    "NASA",
    "ESA",
    "GALEX",
    "perihelion",
    "aphelion",
    "quasar",
    "zyzzyva",
    "word",
    "q",
];

/// Oracle under which every word except [`RARE_WORDS`] is common.
pub fn common_words() -> impl Fn(&str) -> f64 {
    |word: &str| {
        if RARE_WORDS.iter().any(|rare| rare.eq_ignore_ascii_case(word)) {
            0.0
        } else {
            0.5
        }
    }
}

/// Access to the sample documents in `docs/samples/`.
pub struct Samples;

impl Samples {
    pub fn path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("docs")
            .join("samples")
            .join(name)
    }

    pub fn get_string(name: &str) -> io::Result<String> {
        fs::read_to_string(Self::path(name))
    }
}
