//! Configuration loader for descy.
//!
//! `defaults/descy.default.toml` is embedded into the binary and documents
//! every key. Callers layer project and user files on top of it via
//! [`Loader`], apply command-line overrides, and turn the result into the
//! [`RunOptions`] the core consumes.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use descy::annotation::{AnnotateOptions, Emphasis};
use descy::lookup::WikiOptions;
use descy::RunOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/descy.default.toml");

/// Name of the project configuration file picked up from the working
/// directory.
pub const PROJECT_CONFIG: &str = "descy.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct DescyConfig {
    pub debug: bool,
    pub annotate: AnnotateConfig,
    pub lookup: LookupConfig,
    pub store: StoreConfig,
    pub vocabulary: VocabularyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotateConfig {
    pub freq_cutoff: f64,
    pub bold: bool,
    pub italic: bool,
    pub document_start: String,
}

/// Remote description lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    pub use_wiki_desc: bool,
    pub language: String,
    pub sentences: usize,
    pub timeout_secs: u64,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub description_file: Option<PathBuf>,
    pub save_defs: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyConfig {
    pub ignore_file: Option<PathBuf>,
    pub frequency_file: Option<PathBuf>,
}

impl DescyConfig {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            annotate: AnnotateOptions {
                freq_cutoff: self.annotate.freq_cutoff,
                emphasis: Emphasis {
                    bold: self.annotate.bold,
                    italic: self.annotate.italic,
                },
                document_start: self.annotate.document_start.clone(),
            },
            description_file: self.store.description_file.clone(),
            ignore_file: self.vocabulary.ignore_file.clone(),
            frequency_file: self.vocabulary.frequency_file.clone(),
            use_wiki_desc: self.lookup.use_wiki_desc,
            wiki: WikiOptions {
                language: self.lookup.language.clone(),
                sentences: self.lookup.sentences,
                timeout_secs: self.lookup.timeout_secs,
                endpoint: self.lookup.endpoint.clone(),
            },
            debug: self.debug,
            save_defs: self.store.save_defs,
        }
    }
}

/// Builds a [`DescyConfig`] from `descy.default.toml`, then any TOML files,
/// then single-key overrides from the command line. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a TOML file; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML file if it exists, such as a project's `descy.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Set one dotted key, e.g. `annotate.italic` or `lookup.use_wiki_desc`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<DescyConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }
}

impl Default for Loader {
    /// Only the embedded `descy.default.toml`.
    fn default() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }
}

/// Settings as shipped, with no project or user files applied.
pub fn load_defaults() -> Result<DescyConfig, ConfigError> {
    Loader::default().build()
}
