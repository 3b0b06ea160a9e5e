//! Character classes
//!
//! Words are maximal runs of characters that are neither delimiters nor the
//! command start marker. The same classes are spelled out as regexes in
//! [`Lexeme`](super::lexeme::Lexeme); the tests there keep both in sync.

pub const COMMAND_START: char = '\\';
pub const COMMENT_START: char = '%';

pub const SENTENCE_CHARS: &[char] = &['.', ',', '?', '!', ';', ':'];
pub const BRACKET_CHARS: &[char] = &['(', ')', '[', ']', '{', '}'];
pub const EQUATION_CHARS: &[char] = &['=', '*', '/', '+', '-', 'µ', '<', '>', '|'];
pub const BUSINESS_CHARS: &[char] = &['$', '§', '#', '%', '&'];
pub const QUOTE_CHARS: &[char] = &['"', '\'', '`', '´'];
pub const FORMAT_CHARS: &[char] = &['^', '~', '_'];

pub fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace()
        || ch.is_ascii_digit()
        || [
            SENTENCE_CHARS,
            BRACKET_CHARS,
            EQUATION_CHARS,
            BUSINESS_CHARS,
            QUOTE_CHARS,
            FORMAT_CHARS,
        ]
        .iter()
        .any(|set| set.contains(&ch))
}

pub fn is_word_char(ch: char) -> bool {
    ch != COMMAND_START && !is_delimiter(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_characters() {
        for ch in [' ', '\t', '\u{a0}', '7', '.', '{', 'µ', '§', '´', '~'] {
            assert!(is_delimiter(ch), "{:?} should be a delimiter", ch);
        }
        for ch in ['a', 'Z', 'é', 'ß', '@'] {
            assert!(is_word_char(ch), "{:?} should be a word character", ch);
        }
        assert!(!is_word_char(COMMAND_START));
        assert!(is_delimiter(COMMENT_START));
    }
}
