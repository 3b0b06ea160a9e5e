//! Harvesting filter
//!
//! Footnotes in a document hold all kinds of text: citations, remarks,
//! translations. Only those that read like a definition are folded into the
//! definition store.

use once_cell::sync::Lazy;
use regex::Regex;

static DEFINING_CONNECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:is|are|was|were)\s+(?:a|an|the|defined|called|known)\b|refers?\s+to\b|stands?\s+for\b|means\b|denotes\b|describes\b|also\s+known\s+as\b|i\.e\.)",
    )
    .unwrap()
});

/// Does `description` read like a definition of `word`?
///
/// Either a copula naming the word (`<word> is ...`) or a generic defining
/// connective (`is a`, `refers to`, `stands for`, ...) must appear.
pub fn is_definition(word: &str, description: &str) -> bool {
    names_word(word, description) || DEFINING_CONNECTIVE.is_match(description)
}

fn names_word(word: &str, description: &str) -> bool {
    let pattern = format!(r"(?i)\b{}\s+(?:is|are|was|were)\b", regex::escape(word));
    Regex::new(&pattern)
        .map(|copula| copula.is_match(description))
        .unwrap_or(false)
}
