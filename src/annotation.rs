//! Annotation
//!
//! Deciding whether a word deserves an explanation, and rendering it:
//!
//! - [`decision`]: frequency gate, ignore list, description lookup
//! - [`acronym`]: reconstructing what an acronym stands for
//! - [`formatting`]: LaTeX emphasis and footnote markup

pub mod acronym;
pub mod decision;
pub mod formatting;

pub use acronym::{expand_acronym, is_acronym};
pub use decision::{Annotator, ExplainedWords, RunState};
pub use formatting::Emphasis;

/// Cutoffs above this annotate words that are not rare at all.
pub const CUTOFF_WARNING_THRESHOLD: f64 = 0.00001;

pub const DEFAULT_DOCUMENT_START: &str = "\\begin{document}";

/// Options that shape the annotations of a run
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotateOptions {
    /// Words scoring above this are common enough to pass unexplained
    pub freq_cutoff: f64,
    pub emphasis: Emphasis,
    /// Scanning starts at the first line containing this marker
    pub document_start: String,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            freq_cutoff: 0.0,
            emphasis: Emphasis::default(),
            document_start: DEFAULT_DOCUMENT_START.to_string(),
        }
    }
}

impl AnnotateOptions {
    pub fn cutoff_is_suspicious(&self) -> bool {
        self.freq_cutoff > CUTOFF_WARNING_THRESHOLD
    }
}
