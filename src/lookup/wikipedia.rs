//! Wikipedia summaries
//!
//! Direct page-summary lookup first; when the title does not resolve (or
//! resolves to a disambiguation page) the search API is asked for its best
//! hit and that page's summary is used instead. Every failure ends up as a
//! [`SummaryOutcome`]; nothing here returns an error to the scanner.

use super::{SummaryOutcome, SummarySource};
use crate::error::{DescyError, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// Settings for the Wikipedia client
#[derive(Debug, Clone, PartialEq)]
pub struct WikiOptions {
    /// Wikipedia language edition, e.g. `en`
    pub language: String,
    /// Number of sentences kept from a summary
    pub sentences: usize,
    pub timeout_secs: u64,
    /// Base URL overriding the language edition (mirrors, local testing)
    pub endpoint: Option<String>,
}

impl Default for WikiOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            sentences: 1,
            timeout_secs: 10,
            endpoint: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    extract: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug)]
enum LookupError {
    Http(reqwest::Error),
    Url(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Http(err) => write!(f, "{}", err),
            LookupError::Url(msg) => write!(f, "invalid url: {}", msg),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Http(err)
    }
}

pub struct WikipediaClient {
    client: Client,
    base: Url,
    sentences: usize,
}

impl WikipediaClient {
    pub fn new(options: &WikiOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .user_agent(concat!("descy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DescyError::Lookup(e.to_string()))?;

        let endpoint = options
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/", options.language));
        let mut base = Url::parse(&endpoint).map_err(|e| DescyError::Lookup(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            sentences: options.sentences.max(1),
        })
    }

    fn summary_url(&self, title: &str) -> std::result::Result<Url, LookupError> {
        let mut url = self
            .base
            .join("api/rest_v1/page/summary/")
            .map_err(|e| LookupError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Url(self.base.to_string()))?
            .pop_if_empty()
            .push(&title.replace(' ', "_"));
        Ok(url)
    }

    /// Summary of the page titled `title`, `None` when there is no such page.
    fn page_summary(&self, title: &str) -> std::result::Result<Option<String>, LookupError> {
        let response = self.client.get(self.summary_url(title)?).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let page: PageSummary = response.error_for_status()?.json()?;
        if page.kind == "disambiguation" {
            return Ok(None);
        }
        let summary = first_sentences(&page.extract, self.sentences);
        Ok((!summary.is_empty()).then_some(summary))
    }

    /// Title of the best search hit for `word`.
    fn search(&self, word: &str) -> std::result::Result<Option<String>, LookupError> {
        let url = self
            .base
            .join("w/api.php")
            .map_err(|e| LookupError::Url(e.to_string()))?;
        let response: SearchResponse = self
            .client
            .get(url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", word),
                ("srlimit", "1"),
                ("format", "json"),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.query.search.into_iter().next().map(|hit| hit.title))
    }

    fn search_then_fetch(&self, word: &str) -> std::result::Result<Option<String>, LookupError> {
        match self.search(word)? {
            Some(title) => self.page_summary(&title),
            None => Ok(None),
        }
    }
}

impl SummarySource for WikipediaClient {
    fn summary(&self, word: &str) -> SummaryOutcome {
        if let Ok(Some(summary)) = self.page_summary(word) {
            return SummaryOutcome::Found(summary);
        }
        match self.search_then_fetch(word) {
            Ok(Some(summary)) => SummaryOutcome::Found(summary),
            Ok(None) => SummaryOutcome::NotFound,
            Err(err) => SummaryOutcome::Failed(err.to_string()),
        }
    }
}

/// The first `count` sentences of `text`.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of the
/// text.
pub fn first_sentences(text: &str, count: usize) -> String {
    let text = text.trim();
    let mut seen = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if at_boundary {
            seen += 1;
            if seen == count {
                return text[..index + ch.len_utf8()].to_string();
            }
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("One. Two. Three.", 1, "One.")]
    #[case("One. Two. Three.", 2, "One. Two.")]
    #[case("Version 2.5 is out! Really.", 1, "Version 2.5 is out!")]
    #[case("No terminator", 1, "No terminator")]
    #[case("  Padded sentence.  Next.", 1, "Padded sentence.")]
    #[case("", 1, "")]
    fn test_first_sentences(#[case] text: &str, #[case] count: usize, #[case] expected: &str) {
        assert_eq!(first_sentences(text, count), expected);
    }

    #[test]
    fn summary_url_escapes_titles() {
        let client = WikipediaClient::new(&WikiOptions::default()).unwrap();
        let url = client.summary_url("Space Shuttle/Orbiter").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Space_Shuttle%2FOrbiter"
        );
    }

    #[test]
    fn endpoint_overrides_language() {
        let options = WikiOptions {
            endpoint: Some("http://localhost:8080/wiki".to_string()),
            ..WikiOptions::default()
        };
        let client = WikipediaClient::new(&options).unwrap();
        let url = client.summary_url("NASA").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/wiki/api/rest_v1/page/summary/NASA"
        );
    }

    #[test]
    fn page_summary_decodes_extract() {
        let page: PageSummary = serde_json::from_str(
            r#"{"type": "standard", "title": "Perihelion", "extract": "Perihelion is the closest point. More text."}"#,
        )
        .unwrap();
        assert_eq!(page.kind, "standard");
        assert_eq!(first_sentences(&page.extract, 1), "Perihelion is the closest point.");
    }

    #[test]
    fn search_response_decodes_hits() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"batchcomplete": "", "query": {"searchinfo": {"totalhits": 2}, "search": [{"ns": 0, "title": "Apsis"}]}}"#,
        )
        .unwrap();
        assert_eq!(response.query.search[0].title, "Apsis");
    }
}
