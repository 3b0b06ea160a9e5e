//! Documents
//!
//! A LaTeX source as an ordered list of lines. Line terminators are stripped
//! on the way in and restored on the way out, so the scanner only ever sees
//! line content and the written document keeps its original line endings.

use crate::annotation::Annotator;
use crate::annotation::RunState;
use crate::error::{DescyError, Result};
use crate::events::Event;
use crate::scanning::scan_line;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl Document {
    /// Split `text` into lines. The first line terminator decides the line
    /// ending used when rendering.
    pub fn parse(text: &str) -> Self {
        let line_ending = match text.find('\n') {
            Some(index) if text[..index].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        };
        let trailing_newline = text.ends_with('\n');
        let lines = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self {
            lines,
            line_ending,
            trailing_newline,
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DescyError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Same layout, different content.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            line_ending: self.line_ending,
            trailing_newline: self.trailing_newline,
        }
    }

    pub fn render(&self) -> String {
        let mut text = self.lines.join(self.line_ending.as_str());
        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(self.line_ending.as_str());
        }
        text
    }

    /// Replace the file at `path` with this document. The new content is
    /// written next to it and renamed over it; the original permissions are
    /// kept.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let write_err = |source| DescyError::DocumentWrite {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(path).map(|meta| meta.permissions()).ok();

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(self.render().as_bytes()).map_err(write_err)?;
        if let Some(permissions) = permissions {
            fs::set_permissions(file.path(), permissions).map_err(write_err)?;
        }
        file.persist(path).map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

/// A line whose annotated form differs from the original
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// 1-based
    pub line: usize,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedDocument {
    pub lines: Vec<String>,
    pub changes: Vec<LineChange>,
    /// 0-based index of the first scanned line, `None` when the document
    /// start never appeared
    pub scanned_from: Option<usize>,
}

/// Annotate every line from the document start on. Earlier lines (the
/// preamble) are copied untouched. An empty start marker scans everything.
pub fn annotate_lines(
    lines: &[String],
    annotator: &Annotator<'_>,
    state: &mut RunState,
) -> AnnotatedDocument {
    let marker = annotator.options().document_start.as_str();
    let start = if marker.is_empty() {
        Some(0)
    } else {
        lines.iter().position(|line| line.contains(marker))
    };
    let Some(start) = start else {
        annotator.events().emit(Event::DocumentStartMissing {
            marker: marker.to_string(),
        });
        return AnnotatedDocument {
            lines: lines.to_vec(),
            changes: Vec::new(),
            scanned_from: None,
        };
    };

    let mut output = lines[..start].to_vec();
    let mut changes = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(start) {
        let scanned = scan_line(line, index + 1, annotator, state);
        if scanned.changed {
            changes.push(LineChange {
                line: index + 1,
                before: line.clone(),
                after: scanned.text.clone(),
            });
        }
        output.push(scanned.text);
    }
    AnnotatedDocument {
        lines: output,
        changes,
        scanned_from: Some(start),
    }
}
