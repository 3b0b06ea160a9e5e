//! LaTeX rendering of annotations

/// Emphasis applied to annotated words. Both styles compose: italic wraps
/// whatever bold produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
}

impl Default for Emphasis {
    fn default() -> Self {
        Self {
            bold: true,
            italic: false,
        }
    }
}

impl Emphasis {
    pub const NONE: Emphasis = Emphasis {
        bold: false,
        italic: false,
    };

    pub fn apply(&self, text: &str) -> String {
        let mut rendered = text.to_string();
        if self.bold {
            rendered = format!("\\textbf{{{}}}", rendered);
        }
        if self.italic {
            rendered = format!("\\textit{{{}}}", rendered);
        }
        rendered
    }
}

/// `text\footnote{description}`
pub fn with_footnote(text: &str, description: &str) -> String {
    format!("{}\\footnote{{{}}}", text, description)
}

/// `Expansion (ACRONYM)`
pub fn inline_expansion(expansion: &str, acronym: &str) -> String {
    format!("{} ({})", expansion, acronym)
}

/// Escape plain text so it can be placed in a LaTeX argument verbatim.
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
