//! Structured run events
//!
//! The core never logs directly. Everything worth observing during a run is
//! described as an [`Event`] and handed to the [`EventSink`] the caller passed
//! in. The CLI uses [`TracingSink`]; tests use
//! [`RecordingSink`](crate::testing::RecordingSink).

use std::path::PathBuf;
use tracing::{debug, info, warn};

/// How a word was annotated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationStyle {
    /// `Expansion (ACRONYM)` inline
    Expansion,
    /// Emphasised word followed by a footnote
    Footnote,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A word received an annotation
    Annotated {
        line: usize,
        word: String,
        style: AnnotationStyle,
    },
    /// An existing footnote was folded into the definition store
    Harvested { word: String, description: String },
    /// An existing footnote did not look like a definition
    HarvestRejected { word: String, description: String },
    /// No description could be found for an uncommon word
    LookupMiss { word: String },
    /// The remote lookup failed (network, service, decoding)
    LookupFailed { word: String, reason: String },
    /// A description was found but does not mention the word
    DescriptionMismatch { word: String },
    /// The definition store could not be loaded; the run starts empty
    StoreLoadFailed { path: PathBuf, reason: String },
    /// The definition store could not be saved
    StoreSaveFailed { path: PathBuf, reason: String },
    /// An optional vocabulary file (ignore or frequency list) was skipped
    VocabularySkipped { path: PathBuf, reason: String },
    /// The remote lookup could not be set up; the run continues offline
    RemoteUnavailable { reason: String },
    /// The cutoff is high enough to annotate ordinary words
    CutoffTooHigh { cutoff: f64 },
    /// The document-start marker never appeared
    DocumentStartMissing { marker: String },
    /// A line changed (reported in debug runs)
    LineChanged {
        line: usize,
        before: String,
        after: String,
    },
}

/// Receiver for run events
pub trait EventSink {
    fn emit(&self, event: Event);
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match event {
            Event::Annotated { line, word, style } => {
                info!(line, word = %word, ?style, "annotated word");
            }
            Event::Harvested { word, description } => {
                info!(word = %word, description = %description, "found existing description");
            }
            Event::HarvestRejected { word, description } => {
                debug!(word = %word, description = %description, "footnote is not a definition");
            }
            Event::LookupMiss { word } => debug!(word = %word, "no description found"),
            Event::LookupFailed { word, reason } => {
                warn!(word = %word, reason = %reason, "remote lookup failed");
            }
            Event::DescriptionMismatch { word } => {
                debug!(word = %word, "description does not mention the word");
            }
            Event::StoreLoadFailed { path, reason } => {
                warn!(path = %path.display(), reason = %reason, "starting with an empty definition store");
            }
            Event::StoreSaveFailed { path, reason } => {
                warn!(path = %path.display(), reason = %reason, "definitions were not saved");
            }
            Event::VocabularySkipped { path, reason } => {
                warn!(path = %path.display(), reason = %reason, "vocabulary file skipped");
            }
            Event::RemoteUnavailable { reason } => {
                warn!(reason = %reason, "remote lookup disabled");
            }
            Event::CutoffTooHigh { cutoff } => {
                warn!(cutoff, "do not use such a high frequency cutoff");
            }
            Event::DocumentStartMissing { marker } => {
                warn!(marker = %marker, "document start not found, nothing was scanned");
            }
            Event::LineChanged {
                line,
                before,
                after,
            } => {
                info!(line, before = %before, after = %after, "line changed");
            }
        }
    }
}
