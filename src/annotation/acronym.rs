//! Acronym expansion
//!
//! Reconstructs what an acronym stands for from the words that precede it in
//! its description: `the National Aeronautics and Space Administration (NASA)`
//! gives `National Aeronautics and Space Administration`.
//!
//! Letters are matched right to left against the initials of the preceding
//! words, also walked right to left. Every word is looked at once at most, so
//! a word skipped for one letter is never reconsidered for an earlier one.
//! Words skipped between two matches (connectives such as "and" or "of") stay
//! in the expansion. Irregular acronyms (`GALEX` for GALaxy Evolution
//! eXplorer) are not recognised.

/// An acronym is a word of at least two characters that is its own uppercase.
pub fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2 && word == word.to_uppercase()
}

pub fn expand_acronym(acronym: &str, description: &str) -> Option<String> {
    if acronym.is_empty() {
        return None;
    }
    let position = description.find(acronym)?;
    let candidates: Vec<&str> = description[..position].split_whitespace().collect();

    let mut cursor = candidates.len();
    let mut first_match = None;
    let mut last_match = None;
    for letter in acronym.chars().rev() {
        let matched = loop {
            if cursor == 0 {
                return None;
            }
            cursor -= 1;
            if initial(candidates[cursor]) == Some(letter) {
                break cursor;
            }
        };
        last_match.get_or_insert(matched);
        first_match = Some(matched);
    }

    let (first, last) = (first_match?, last_match?);
    let expansion = candidates[first..=last].join(" ");
    let expansion = expansion
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches(|c: char| !c.is_alphanumeric());
    Some(expansion.to_string())
}

/// First alphanumeric character of a candidate word, skipping quotes and
/// opening brackets.
fn initial(word: &str) -> Option<char> {
    word.chars().find(|c| c.is_alphanumeric())
}
