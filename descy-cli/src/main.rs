//! Command-line interface for descy
//! Annotates the uncommon words of a LaTeX document in place.
//!
//! Usage:
//!   descy `<path>` [--config `<file>`] [--description-file `<file>`] [--freq-cutoff `<f>`]
//!         [--ignore-file `<file>`] [--frequency-file `<file>`] [--italic] [--no-bold]
//!         [--debug] [--offline] [--no-save-defs] [-v]
//!
//! Settings are read from the built-in defaults, `descy.toml` in the working
//! directory and `--config`, in that order; flags win over all of them.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use descy::events::TracingSink;
use descy::{RunOptions, RunReport};
use descy_config::{Loader, PROJECT_CONFIG};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(err) = execute(&matches) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("descy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Annotates uncommon words in LaTeX documents with descriptions")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the LaTeX document, rewritten in place")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and descy.toml")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("description-file")
                .long("description-file")
                .short('d')
                .help("JSON file with word descriptions, updated at the end of the run")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("freq-cutoff")
                .long("freq-cutoff")
                .help("Words more frequent than this (0..1) are not annotated")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("ignore-file")
                .long("ignore-file")
                .help("Extra words never to annotate")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("frequency-file")
                .long("frequency-file")
                .help("Extra `word value` frequency list")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("italic")
                .long("italic")
                .help("Set annotated words in italics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-bold")
                .long("no-bold")
                .help("Do not set annotated words in bold")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Print changed lines instead of rewriting the document")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Do not look up descriptions on Wikipedia")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-save-defs")
                .long("no-save-defs")
                .help("Do not write the description file back")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every lookup decision")
                .action(ArgAction::SetTrue),
        )
}

/// Logs go to stderr so that stdout only carries settings and results.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("descy={level},descy_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("path")
        .context("a document path is required")?;
    let options = load_options(matches)?;
    print_settings(path, &options);

    debug!(path = %path.display(), "starting run");
    let report = descy::run(path, &options, &TracingSink)
        .with_context(|| format!("failed to annotate {}", path.display()))?;

    if options.debug {
        print_changes(&report);
    }
    print_summary(&report);
    Ok(())
}

fn load_options(matches: &ArgMatches) -> Result<RunOptions> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG);
    if let Some(config) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(config);
    }

    if let Some(file) = matches.get_one::<PathBuf>("description-file") {
        loader = loader.set_override("store.description_file", path_value(file))?;
    }
    if let Some(cutoff) = matches.get_one::<f64>("freq-cutoff") {
        loader = loader.set_override("annotate.freq_cutoff", *cutoff)?;
    }
    if let Some(file) = matches.get_one::<PathBuf>("ignore-file") {
        loader = loader.set_override("vocabulary.ignore_file", path_value(file))?;
    }
    if let Some(file) = matches.get_one::<PathBuf>("frequency-file") {
        loader = loader.set_override("vocabulary.frequency_file", path_value(file))?;
    }

    let flags = [
        ("italic", "annotate.italic", true),
        ("no-bold", "annotate.bold", false),
        ("debug", "debug", true),
        ("offline", "lookup.use_wiki_desc", false),
        ("no-save-defs", "store.save_defs", false),
    ];
    for (flag, key, value) in flags {
        if matches.get_flag(flag) {
            loader = loader.set_override(key, value)?;
        }
    }

    let config = loader.build().context("invalid configuration")?;
    Ok(config.run_options())
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn print_settings(path: &Path, options: &RunOptions) {
    let optional = |path: &Option<PathBuf>| {
        path.as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let settings = [
        ("filepath", path.display().to_string()),
        ("description_file", optional(&options.description_file)),
        ("freq_cutoff", options.annotate.freq_cutoff.to_string()),
        ("bold", options.annotate.emphasis.bold.to_string()),
        ("italic", options.annotate.emphasis.italic.to_string()),
        ("debug", options.debug.to_string()),
        ("use_wiki_desc", options.use_wiki_desc.to_string()),
        ("save_defs", options.save_defs.to_string()),
        ("ignore_file", optional(&options.ignore_file)),
        ("frequency_file", optional(&options.frequency_file)),
    ];
    let width = settings.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in settings {
        println!("{key:>width$}: {value}");
    }
    println!();
}

fn print_changes(report: &RunReport) {
    for change in &report.changes {
        println!("line {}:", change.line);
        println!("  - {}", change.before);
        println!("  + {}", change.after);
    }
}

fn print_summary(report: &RunReport) {
    let outcome = if report.document_written {
        "document updated"
    } else {
        "document unchanged"
    };
    println!(
        "{} words annotated, {} descriptions harvested, {} known; {}",
        report.annotated, report.harvested, report.definitions, outcome
    );
}
