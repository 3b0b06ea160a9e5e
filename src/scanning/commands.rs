//! Control sequence kinds
//!
//! A command name is classified once, when the command closes. The kind
//! decides what happens to the argument group that follows it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `\footnote`: its argument is an existing description
    Footnote,
    /// Emphasis commands: their argument is already highlighted
    Emphasis,
    /// Commands whose argument is an identifier, not prose
    Literal,
    Other,
}

impl CommandKind {
    pub fn classify(name: &str) -> Self {
        match name {
            "footnote" => CommandKind::Footnote,
            "textbf" | "textit" | "emph" | "underline" | "textsc" | "textsl" => {
                CommandKind::Emphasis
            }
            "label" | "ref" | "eqref" | "pageref" | "autoref" | "cref" | "Cref" | "cite"
            | "citep" | "citet" | "nocite" | "url" | "href" | "begin" | "end" | "input"
            | "include" | "includegraphics" | "usepackage" | "documentclass" | "bibliography"
            | "bibliographystyle" | "newcommand" | "renewcommand" | "newenvironment"
            | "hypersetup" | "hyperref" => CommandKind::Literal,
            _ => CommandKind::Other,
        }
    }

    /// Words inside this kind's argument are never annotated.
    pub fn suppresses_annotation(self) -> bool {
        !matches!(self, CommandKind::Other)
    }
}
