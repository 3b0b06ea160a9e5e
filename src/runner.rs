//! Runs
//!
//! One run annotates one document: build the collaborators from
//! [`RunOptions`], load the definition store, scan the document, write it back
//! and save the store. [`run`] builds the real collaborators; [`run_with`]
//! takes them from the caller, which is what the tests use.

use crate::annotation::{AnnotateOptions, Annotator, RunState};
use crate::document::{annotate_lines, Document, LineChange};
use crate::error::Result;
use crate::events::{Event, EventSink};
use crate::ignore::IgnoreSet;
use crate::lookup::{
    CorpusFrequencies, DescriptionResolver, FrequencyOracle, FrequencyTable, SummarySource,
    WikiOptions, WikipediaClient,
};
use crate::store::DefinitionStore;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub annotate: AnnotateOptions,
    /// JSON definition store; without one nothing is loaded or saved
    pub description_file: Option<PathBuf>,
    pub ignore_file: Option<PathBuf>,
    pub frequency_file: Option<PathBuf>,
    pub use_wiki_desc: bool,
    pub wiki: WikiOptions,
    /// Report changes instead of writing the document
    pub debug: bool,
    pub save_defs: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            annotate: AnnotateOptions::default(),
            description_file: None,
            ignore_file: None,
            frequency_file: None,
            use_wiki_desc: true,
            wiki: WikiOptions::default(),
            debug: false,
            save_defs: true,
        }
    }
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub lines: usize,
    pub changes: Vec<LineChange>,
    pub annotated: usize,
    pub harvested: usize,
    /// Size of the definition store at the end of the run
    pub definitions: usize,
    pub document_written: bool,
    pub store_saved: bool,
}

/// Annotate the document at `path` with the English corpus, the bundled
/// ignore list, the configured extra files and, when enabled, Wikipedia
/// lookups.
pub fn run(path: &Path, options: &RunOptions, events: &dyn EventSink) -> Result<RunReport> {
    let mut ignore = IgnoreSet::bundled();
    if let Some(file) = &options.ignore_file {
        if let Err(err) = ignore.extend_from_file(file) {
            events.emit(Event::VocabularySkipped {
                path: file.clone(),
                reason: err.to_string(),
            });
        }
    }

    let mut overlay = FrequencyTable::new();
    if let Some(file) = &options.frequency_file {
        if let Err(err) = overlay.extend_from_file(file) {
            events.emit(Event::VocabularySkipped {
                path: file.clone(),
                reason: err.to_string(),
            });
        }
    }
    let frequencies = overlay.over(CorpusFrequencies::english()?);

    let client = if options.use_wiki_desc {
        match WikipediaClient::new(&options.wiki) {
            Ok(client) => Some(client),
            Err(err) => {
                events.emit(Event::RemoteUnavailable {
                    reason: err.to_string(),
                });
                None
            }
        }
    } else {
        None
    };
    let remote = client.as_ref().map(|client| client as &dyn SummarySource);

    run_with(path, options, &frequencies, &ignore, remote, events)
}

/// Annotate the document at `path` with the given collaborators.
/// `remote` is `None` when lookups are disabled.
pub fn run_with(
    path: &Path,
    options: &RunOptions,
    oracle: &dyn FrequencyOracle,
    ignore: &IgnoreSet,
    remote: Option<&dyn SummarySource>,
    events: &dyn EventSink,
) -> Result<RunReport> {
    let document = Document::read(path)?;

    if options.annotate.cutoff_is_suspicious() {
        events.emit(Event::CutoffTooHigh {
            cutoff: options.annotate.freq_cutoff,
        });
    }

    let store = match &options.description_file {
        Some(file) => DefinitionStore::load_or_default(file, events),
        None => DefinitionStore::new(),
    };
    let mut state = RunState::new(store);
    let annotator = Annotator::new(
        &options.annotate,
        oracle,
        ignore,
        DescriptionResolver::new(remote),
        events,
    );
    let annotated = annotate_lines(document.lines(), &annotator, &mut state);

    if options.debug {
        for change in &annotated.changes {
            events.emit(Event::LineChanged {
                line: change.line,
                before: change.before.clone(),
                after: change.after.clone(),
            });
        }
    }

    let document_written = !options.debug && !annotated.changes.is_empty();
    if document_written {
        document.with_lines(annotated.lines).write_atomic(path)?;
    }

    let mut store_saved = false;
    if options.save_defs {
        if let Some(file) = &options.description_file {
            match state.store.save(file) {
                Ok(()) => store_saved = true,
                Err(err) => events.emit(Event::StoreSaveFailed {
                    path: file.clone(),
                    reason: err.to_string(),
                }),
            }
        }
    }

    Ok(RunReport {
        lines: document.lines().len(),
        changes: annotated.changes,
        annotated: state.annotated,
        harvested: state.harvested,
        definitions: state.store.len(),
        document_written,
        store_saved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DescyError;
    use crate::testing::{common_words, RecordingSink, StaticSummaries};
    use std::fs;

    const PAPER: &str = "\\documentclass{article}\n\\begin{document}\nThe perihelion of NASA.\n\\end{document}\n";

    fn remote() -> StaticSummaries {
        StaticSummaries::new()
            .with(
                "perihelion",
                "perihelion is the point in an orbit closest to the sun",
            )
            .with(
                "NASA",
                "the National Aeronautics and Space Administration (NASA) is an agency",
            )
    }

    fn options(dir: &Path) -> RunOptions {
        RunOptions {
            description_file: Some(dir.join("descriptions.json")),
            ..RunOptions::default()
        }
    }

    #[test]
    fn annotates_writes_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(&path, PAPER).unwrap();
        let options = options(dir.path());
        let remote = remote();
        let sink = RecordingSink::new();

        let report = run_with(
            &path,
            &options,
            &common_words(),
            &IgnoreSet::new(),
            Some(&remote),
            &sink,
        )
        .unwrap();

        assert_eq!(report.lines, 4);
        assert_eq!(report.annotated, 2);
        assert_eq!(report.definitions, 2);
        assert!(report.document_written);
        assert!(report.store_saved);

        let written = fs::read_to_string(&path).unwrap();
        insta::assert_snapshot!(written.trim_end(), @r###"
        \documentclass{article}
        \begin{document}
        The \textbf{perihelion}\footnote{"perihelion is the point in an orbit closest to the sun"} of \textbf{National Aeronautics and Space Administration (NASA)}.
        \end{document}
        "###);

        let store = DefinitionStore::load(options.description_file.as_deref().unwrap()).unwrap();
        assert_eq!(
            store.get("perihelion"),
            Some("\"perihelion is the point in an orbit closest to the sun\"")
        );
    }

    #[test]
    fn debug_runs_leave_the_document_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(&path, PAPER).unwrap();
        let options = RunOptions {
            debug: true,
            ..options(dir.path())
        };
        let remote = remote();
        let sink = RecordingSink::new();

        let report = run_with(
            &path,
            &options,
            &common_words(),
            &IgnoreSet::new(),
            Some(&remote),
            &sink,
        )
        .unwrap();

        assert!(!report.document_written);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), PAPER);
        assert!(sink
            .events()
            .iter()
            .any(|event| matches!(event, Event::LineChanged { line: 3, .. })));
    }

    #[test]
    fn high_cutoff_warns_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(&path, PAPER).unwrap();
        let mut options = options(dir.path());
        options.annotate.freq_cutoff = 0.01;
        let sink = RecordingSink::new();

        run_with(&path, &options, &common_words(), &IgnoreSet::new(), None, &sink).unwrap();
        assert_eq!(sink.events()[0], Event::CutoffTooHigh { cutoff: 0.01 });
    }

    #[test]
    fn unparsable_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(&path, PAPER).unwrap();
        let options = options(dir.path());
        fs::write(options.description_file.as_ref().unwrap(), "[1, 2]").unwrap();
        let sink = RecordingSink::new();

        let report =
            run_with(&path, &options, &common_words(), &IgnoreSet::new(), None, &sink).unwrap();
        assert_eq!(report.annotated, 0);
        assert!(report.store_saved);
        assert!(matches!(
            sink.events().first(),
            Some(Event::StoreLoadFailed { .. })
        ));
    }

    #[test]
    fn save_failures_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(&path, PAPER).unwrap();
        let options = RunOptions {
            description_file: Some(dir.path().join("missing").join("descriptions.json")),
            ..RunOptions::default()
        };
        let sink = RecordingSink::new();

        let report =
            run_with(&path, &options, &common_words(), &IgnoreSet::new(), None, &sink).unwrap();
        assert!(!report.store_saved);
        assert!(matches!(
            sink.events().last(),
            Some(Event::StoreSaveFailed { .. })
        ));
    }

    #[test]
    fn unreadable_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_with(
            &dir.path().join("missing.tex"),
            &RunOptions::default(),
            &common_words(),
            &IgnoreSet::new(),
            None,
            &RecordingSink::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DescyError::DocumentRead { .. }));
    }

    #[test]
    fn broken_vocabulary_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(&path, PAPER).unwrap();
        let options = RunOptions {
            ignore_file: Some(dir.path().join("missing-ignore.txt")),
            use_wiki_desc: false,
            ..RunOptions::default()
        };
        let sink = RecordingSink::new();

        let report = run(&path, &options, &sink).unwrap();
        assert!(!report.document_written);
        assert!(matches!(
            sink.events().first(),
            Some(Event::VocabularySkipped { .. })
        ));
    }

    #[test]
    fn everyday_words_stay_plain_with_the_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(
            &path,
            "\\begin{document}\nThe perihelion shifts by one century, costs grew and the agency launched a telescope.\n",
        )
        .unwrap();
        let store = dir.path().join("descriptions.json");
        fs::write(
            &store,
            r#"{ "century": "a century is 100 years", "perihelion": "the perihelion is the closest point to the sun" }"#,
        )
        .unwrap();
        let options = RunOptions {
            annotate: AnnotateOptions {
                freq_cutoff: 0.00001,
                ..AnnotateOptions::default()
            },
            description_file: Some(store),
            use_wiki_desc: false,
            ..RunOptions::default()
        };

        let report = run(&path, &options, &RecordingSink::new()).unwrap();
        assert_eq!(report.annotated, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\\begin{document}\nThe \\textbf{perihelion}\\footnote{the perihelion is the closest point to the sun} shifts by one century, costs grew and the agency launched a telescope.\n"
        );
    }

    #[test]
    fn frequency_file_wins_over_the_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.tex");
        fs::write(&path, "\\begin{document}\nOne century passed.\n").unwrap();
        let store = dir.path().join("descriptions.json");
        fs::write(&store, r#"{ "century": "a century is 100 years" }"#).unwrap();
        let frequencies = dir.path().join("frequencies.txt");
        fs::write(&frequencies, "century 0\n").unwrap();
        let options = RunOptions {
            description_file: Some(store),
            frequency_file: Some(frequencies),
            use_wiki_desc: false,
            ..RunOptions::default()
        };

        let report = run(&path, &options, &RecordingSink::new()).unwrap();
        assert_eq!(report.annotated, 1);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("\\textbf{century}\\footnote{a century is 100 years}"));
    }
}
