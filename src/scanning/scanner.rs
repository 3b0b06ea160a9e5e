//! Line scanner
//!
//! A single left-to-right pass over the lexemes of one line. Characters
//! outside words are copied as they come; a word is held back until the next
//! lexeme closes it, and only then handed to the [`Annotator`]. Command
//! argument groups are tracked on a small stack so that footnote text can be
//! harvested and highlighted or literal arguments left alone.
//!
//! All state lives in [`LineScanner`] and dies with the line: an unmatched
//! brace or a footnote spanning lines is simply forgotten at line end.

use super::chars::{is_word_char, QUOTE_CHARS, SENTENCE_CHARS};
use super::commands::CommandKind;
use super::harvest::is_definition;
use super::lexeme::{lex, Lexeme};
use crate::annotation::{is_acronym, Annotator, RunState};
use crate::events::Event;
use std::ops::Range;

/// Appended to every line so that a word at line end is closed like any
/// other.
const SENTINEL: char = ' ';
const CLOSING_BRACKETS: &[char] = &[')', ']', '}'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub text: String,
    pub changed: bool,
}

/// Scan one line (without its terminator). `line_number` is 1-based and only
/// used for events.
pub fn scan_line(
    line: &str,
    line_number: usize,
    annotator: &Annotator<'_>,
    state: &mut RunState,
) -> ScannedLine {
    let mut source = String::with_capacity(line.len() + 1);
    source.push_str(line);
    source.push(SENTINEL);

    let mut scanner = LineScanner::new(&source, line_number, annotator);
    let completed = scanner.run(state);
    let mut text = scanner.out;
    if completed {
        text.pop();
    }
    let changed = text != line;
    ScannedLine { text, changed }
}

/// An open `{...}` group
#[derive(Debug)]
struct Group {
    command: CommandKind,
    /// Byte offset right after the opening brace
    start: usize,
    /// Word a footnote group belongs to
    target: Option<String>,
}

struct LineScanner<'s, 'a> {
    source: &'s str,
    line: usize,
    annotator: &'a Annotator<'a>,
    out: String,
    pending: Option<Range<usize>>,
    last_word: Option<&'s str>,
    /// Kind of the last command, until its argument group opens
    awaiting: Option<CommandKind>,
    /// Inside `[...]` optional arguments of the awaiting command
    optional: bool,
    groups: Vec<Group>,
    math: bool,
}

impl<'s, 'a> LineScanner<'s, 'a> {
    fn new(source: &'s str, line: usize, annotator: &'a Annotator<'a>) -> Self {
        Self {
            source,
            line,
            annotator,
            out: String::with_capacity(source.len()),
            pending: None,
            last_word: None,
            awaiting: None,
            optional: false,
            groups: Vec::new(),
            math: false,
        }
    }

    /// Returns `false` when a comment cut the line short.
    fn run(&mut self, state: &mut RunState) -> bool {
        let source = self.source;
        let mut offset = 0;
        for (lexeme, slice) in lex(source) {
            let span = offset..offset + slice.len();
            offset = span.end;

            let Some(lexeme) = lexeme else {
                self.close_pending(state);
                self.out.push_str(slice);
                continue;
            };

            if lexeme != Lexeme::Word {
                self.close_pending(state);
            }
            match lexeme {
                Lexeme::Word if self.optional => {}
                Lexeme::Word => {
                    self.awaiting = None;
                    self.pending = Some(span);
                    continue;
                }
                Lexeme::Percent => return false,
                Lexeme::Command => {
                    self.awaiting = Some(CommandKind::classify(&slice[1..]));
                    self.optional = false;
                }
                Lexeme::LeftBrace => {
                    let command = self.awaiting.take().unwrap_or(CommandKind::Other);
                    let target = match command {
                        CommandKind::Footnote => self.last_word.map(str::to_string),
                        _ => None,
                    };
                    self.optional = false;
                    self.groups.push(Group {
                        command,
                        start: span.end,
                        target,
                    });
                }
                Lexeme::RightBrace => {
                    self.awaiting = None;
                    if let Some(group) = self.groups.pop() {
                        if group.command == CommandKind::Footnote {
                            self.harvest(group.target, &source[group.start..span.start], state);
                        }
                    }
                }
                Lexeme::Dollar | Lexeme::DoubleDollar => {
                    self.awaiting = None;
                    self.math = !self.math;
                }
                Lexeme::ControlSymbol => {
                    self.awaiting = None;
                    match slice {
                        "\\(" | "\\[" => self.math = true,
                        "\\)" | "\\]" => self.math = false,
                        _ => {}
                    }
                }
                Lexeme::Delimiter => match slice {
                    "[" if self.awaiting.is_some() => self.optional = true,
                    "]" if self.optional => self.optional = false,
                    _ => {}
                },
            }
            self.out.push_str(slice);
        }
        self.close_pending(state);
        true
    }

    fn close_pending(&mut self, state: &mut RunState) {
        let Some(span) = self.pending.take() else {
            return;
        };
        let source = self.source;
        let word = &source[span.clone()];
        self.last_word = Some(word);

        if self.parenthesized_acronym(word, &span) {
            state.explained.insert(word);
            self.out.push_str(word);
            return;
        }
        if self.suppressed() || self.footnote_follows(span.end) {
            self.out.push_str(word);
            return;
        }
        if word.chars().count() < 2 || word.contains("--") || state.explained.contains(word) {
            self.out.push_str(word);
            return;
        }
        let replacement = self.annotator.annotate(word, self.line, state);
        self.out.push_str(&replacement);
    }

    fn suppressed(&self) -> bool {
        self.math
            || self
                .groups
                .iter()
                .any(|group| group.command.suppresses_annotation())
    }

    /// `word\footnote`, `\textbf{word}\footnote`, `word.\footnote`, `"word"\footnote`
    fn footnote_follows(&self, end: usize) -> bool {
        let rest = self.source[end..].trim_start_matches(|ch: char| {
            ch.is_whitespace()
                || CLOSING_BRACKETS.contains(&ch)
                || SENTENCE_CHARS.contains(&ch)
                || QUOTE_CHARS.contains(&ch)
        });
        rest.strip_prefix("\\footnote")
            .map_or(false, |after| !after.starts_with(is_word_char))
    }

    /// `(NASA)` right after an inline expansion
    fn parenthesized_acronym(&self, word: &str, span: &Range<usize>) -> bool {
        is_acronym(word)
            && self.source[..span.start].ends_with('(')
            && self.source[span.end..].starts_with(')')
    }

    fn harvest(&self, target: Option<String>, text: &str, state: &mut RunState) {
        let Some(word) = target else {
            return;
        };
        let description = text.trim();
        let events = self.annotator.events();
        if is_definition(&word, description) {
            state.store.insert(&word, description);
            state.harvested += 1;
            events.emit(Event::Harvested {
                word: word.clone(),
                description: description.to_string(),
            });
        } else {
            events.emit(Event::HarvestRejected {
                word: word.clone(),
                description: description.to_string(),
            });
        }
        state.explained.insert(&word);
    }
}
