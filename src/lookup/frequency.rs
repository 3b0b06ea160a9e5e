//! Word frequency oracle
//!
//! Scores how common a word is in ordinary language, on a `[0, 1]` scale.
//! Scores come from the English `wordfreq` corpus model compiled into the
//! binary. A user list (one `word value` pair per line) can be layered on
//! top; its entries win over the corpus.

use crate::error::{DescyError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use wordfreq::WordFreq;
use wordfreq_model::{load_wordfreq, ModelKind};

/// Commonality score of a word in ordinary language.
pub trait FrequencyOracle {
    /// Score in `[0, 1]`; unknown words score `0.0`.
    fn frequency(&self, word: &str) -> f64;
}

impl<F> FrequencyOracle for F
where
    F: Fn(&str) -> f64,
{
    fn frequency(&self, word: &str) -> f64 {
        self(word)
    }
}

/// English word frequencies from the `wordfreq` corpus.
pub struct CorpusFrequencies {
    model: WordFreq,
}

impl CorpusFrequencies {
    /// Load the large English model, the widest vocabulary `wordfreq` ships.
    pub fn english() -> Result<Self> {
        let model =
            load_wordfreq(ModelKind::LargeEn).map_err(|err| DescyError::Corpus(err.to_string()))?;
        Ok(Self { model })
    }
}

impl FrequencyOracle for CorpusFrequencies {
    fn frequency(&self, word: &str) -> f64 {
        f64::from(self.model.word_frequency(&word.to_lowercase())).clamp(0.0, 1.0)
    }
}

/// Case-insensitive frequency table read from user lists.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    frequencies: HashMap<String, f64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a frequency list file; its entries win over existing ones.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|err| DescyError::FrequencyList {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let entries = parse_entries(&text).map_err(|reason| DescyError::FrequencyList {
            path: path.to_path_buf(),
            reason,
        })?;
        self.merge(entries);
        Ok(())
    }

    pub fn insert(&mut self, word: &str, frequency: f64) {
        self.frequencies
            .insert(word.to_lowercase(), frequency.clamp(0.0, 1.0));
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.frequencies.get(&word.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Put this table in front of `base`: listed words take the table's
    /// score, everything else falls through.
    pub fn over<B: FrequencyOracle>(self, base: B) -> Layered<B> {
        Layered {
            overlay: self,
            base,
        }
    }

    fn merge(&mut self, entries: Vec<(String, f64)>) {
        // Raw counts are normalised into frequencies
        let total: f64 = entries.iter().map(|(_, value)| value).sum();
        let is_counts = entries.iter().any(|(_, value)| *value > 1.0);
        for (word, value) in entries {
            let frequency = if is_counts { value / total } else { value };
            self.insert(&word, frequency);
        }
    }
}

impl FrequencyOracle for FrequencyTable {
    fn frequency(&self, word: &str) -> f64 {
        self.get(word).unwrap_or(0.0)
    }
}

/// A user table layered over another oracle.
pub struct Layered<B> {
    overlay: FrequencyTable,
    base: B,
}

impl<B: FrequencyOracle> FrequencyOracle for Layered<B> {
    fn frequency(&self, word: &str) -> f64 {
        self.overlay
            .get(word)
            .unwrap_or_else(|| self.base.frequency(word))
    }
}

fn parse_entries(text: &str) -> std::result::Result<Vec<(String, f64)>, String> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(word), Some(value)) = (fields.next(), fields.next()) else {
            return Err(format!("line {}: expected `<word> <value>`", index + 1));
        };
        let value: f64 = value
            .parse()
            .map_err(|_| format!("line {}: `{}` is not a number", index + 1, value))?;
        if !value.is_finite() || value < 0.0 {
            return Err(format!("line {}: `{}` is out of range", index + 1, value));
        }
        entries.push((word.to_string(), value));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotateOptions;

    #[test]
    fn everyday_words_are_common_in_the_corpus() {
        let corpus = CorpusFrequencies::english().unwrap();
        let cutoff = AnnotateOptions::default().freq_cutoff;
        for word in ["century", "agency", "launched", "telescope", "shifts", "costs"] {
            assert!(
                corpus.frequency(word) > cutoff,
                "{word} scored {}",
                corpus.frequency(word)
            );
        }
        assert!(corpus.frequency("the") > corpus.frequency("planet"));
        assert_eq!(corpus.frequency("Century"), corpus.frequency("century"));
        assert!(corpus.frequency("perihelion") < 1e-5);
        assert_eq!(corpus.frequency("qxzvbrtl"), 0.0);
    }

    #[test]
    fn counts_are_normalised() {
        let mut table = FrequencyTable::new();
        table.merge(parse_entries("apple 30\npear 10\n").unwrap());
        assert!((table.frequency("apple") - 0.75).abs() < 1e-12);
        assert!((table.frequency("PEAR") - 0.25).abs() < 1e-12);
    }

    #[test]
    fn user_file_overrides_the_base_oracle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.txt");
        fs::write(&path, "# custom\nthe 0.0\nperihelion 0.5\n").unwrap();

        let mut table = FrequencyTable::new();
        table.extend_from_file(&path).unwrap();
        let oracle = table.over(|_: &str| 0.25);
        assert_eq!(oracle.frequency("the"), 0.0);
        assert_eq!(oracle.frequency("Perihelion"), 0.5);
        assert_eq!(oracle.frequency("orbit"), 0.25);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut table = FrequencyTable::new();
        let err = table
            .extend_from_file(Path::new("/nonexistent/freq.txt"))
            .unwrap_err();
        assert!(matches!(err, DescyError::FrequencyList { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(parse_entries("lonely\n").is_err());
        assert!(parse_entries("word many\n").is_err());
        assert!(parse_entries("word -1\n").is_err());
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |word: &str| if word == "common" { 1.0 } else { 0.0 };
        assert_eq!(oracle.frequency("common"), 1.0);
        assert_eq!(oracle.frequency("rare"), 0.0);
    }
}
