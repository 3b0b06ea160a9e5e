//! # descy
//!
//! Annotates uncommon words in LaTeX documents. Every word of the document
//! body is scored against ordinary language; rare words get a description
//! the first time they appear, either as an inline expansion for acronyms
//! (`National Aeronautics and Space Administration (NASA)`) or as a footnote.
//!
//! Descriptions come from a JSON definition store, from footnotes already in
//! the document, and from Wikipedia summaries. Running descy on its own output
//! changes nothing.
//!
//! The entry point is [`runner::run`]; [`scanning::scan_line`] annotates a
//! single line.
//!
//! ## Testing
//!
//! Doubles for the event sink, the remote lookup and the frequency oracle are
//! in the [testing module](testing). Tests never reach the network.

pub mod annotation;
pub mod document;
pub mod error;
pub mod events;
pub mod ignore;
pub mod lookup;
pub mod runner;
pub mod scanning;
pub mod store;
pub mod testing;

pub use error::{DescyError, Result};
pub use runner::{run, run_with, RunOptions, RunReport};
