//! Lexical classes of a LaTeX line
//!
//! The scanner works on these instead of raw characters. Every character of a
//! line belongs to exactly one lexeme, so concatenating the slices of all
//! lexemes gives the line back.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// Maximal run of word characters
    #[regex(r#"[^\s"'`´.,?!;:()\[\]{}=*/+\-µ<>|$§#%&^~_0-9\\]+"#)]
    Word,

    /// `\name`: the name runs until the first delimiter
    #[regex(r#"\\[^\s"'`´.,?!;:()\[\]{}=*/+\-µ<>|$§#%&^~_0-9\\]+"#)]
    Command,

    /// `\` followed by one delimiter or another `\`: escapes such as `\%`,
    /// `\{`, `\\` and `\ `
    #[regex(r#"\\[\s"'`´.,?!;:()\[\]{}=*/+\-µ<>|$§#%&^~_0-9\\]"#)]
    ControlSymbol,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("$$")]
    DoubleDollar,

    #[token("$")]
    Dollar,

    /// Unescaped comment marker
    #[token("%")]
    Percent,

    /// Any other single delimiter character
    #[regex(r#"[\s"'`´.,?!;:()\[\]=*/+\-µ<>|§#&^~_0-9]"#)]
    Delimiter,
}

/// Lex a line into `(lexeme, slice)` pairs. Unlexable input (a lone trailing
/// backslash) comes back as `None`.
pub fn lex(source: &str) -> Vec<(Option<Lexeme>, &str)> {
    let mut lexer = Lexeme::lexer(source);
    let mut lexemes = Vec::new();
    while let Some(result) = lexer.next() {
        lexemes.push((result.ok(), lexer.slice()));
    }
    lexemes
}
