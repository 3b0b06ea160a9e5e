//! Lookups
//!
//! Everything the annotator asks about a word that is not in the text itself:
//!
//! - [`frequency`]: how common the word is in ordinary language
//! - [`wikipedia`]: a short remote summary of the topic
//! - [`resolver`]: stored description first, remote summary second

pub mod frequency;
pub mod resolver;
pub mod wikipedia;

pub use frequency::{CorpusFrequencies, FrequencyOracle, FrequencyTable, Layered};
pub use resolver::{DescriptionResolver, Resolution};
pub use wikipedia::{WikiOptions, WikipediaClient};

/// Result of asking a remote source about a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Found(String),
    NotFound,
    /// Network or service failure, with a human readable reason
    Failed(String),
}

/// Remote source of short topic summaries.
pub trait SummarySource {
    fn summary(&self, word: &str) -> SummaryOutcome;
}
