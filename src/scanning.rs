//! Scanning
//!
//! Turns one line of LaTeX source into its annotated form. The lexical
//! classes live in [`lexeme`] (with the raw character sets in [`chars`]);
//! the state machine that walks them is in [`scanner`].

pub mod chars;
pub mod commands;
pub mod harvest;
pub mod lexeme;
pub mod scanner;

pub use commands::CommandKind;
pub use harvest::is_definition;
pub use scanner::{scan_line, ScannedLine};
