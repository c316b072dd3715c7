use swc_core::common::{SourceMapper, Span};
use thiserror::Error;

pub type Result<T, E = JsxTemplateError> = std::result::Result<T, E>;

/// Everything that can abort the compilation of a JSX unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Unknown element tag type: {0}")]
    UnknownTagType(&'static str),

    #[error("Unknown child type: {0}")]
    UnknownChildType(&'static str),

    #[error("Couldn't transform attribute {0:?}")]
    UnsupportedAttribute(String),

    #[error("Event prop can't be a string literal")]
    EventStringLiteral,

    #[error("Event prop must have a value")]
    EventWithoutValue,

    #[error("`key` attribute must have a value")]
    KeyWithoutValue,

    #[error("Dynamic tag replacement is allowed only once.")]
    DuplicateDynamicTag,

    #[error("Dynamic tag expression is not allowed here: {0}")]
    DisallowedDynamicTag(&'static str),

    #[error("Couldn't print generated code: {0}")]
    Print(String),
}

#[derive(Debug, Clone, Error)]
#[error("{kind}{}", frame_suffix(.code_frame))]
pub struct JsxTemplateError {
    pub kind: ErrorKind,
    pub span: Span,
    pub code_frame: Option<String>,
}

fn frame_suffix(frame: &Option<String>) -> String {
    frame
        .as_ref()
        .map(|frame| format!("\n\n{frame}\n"))
        .unwrap_or_default()
}

impl JsxTemplateError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            code_frame: None,
        }
    }

    /// Attach the offending source lines, unless a frame is already present.
    pub fn with_code_frame(mut self, cm: &dyn SourceMapper) -> Self {
        if self.code_frame.is_none() {
            self.code_frame = code_frame(cm, self.span);
        }
        self
    }
}

/// Render `file:line:col` plus the source line with the span underlined.
///
/// Dummy spans (nodes we synthesized ourselves) have no frame.
pub fn code_frame(cm: &dyn SourceMapper, span: Span) -> Option<String> {
    if span.is_dummy() {
        return None;
    }
    let lo = cm.lookup_char_pos(span.lo());
    let line = lo.file.get_line(lo.line.saturating_sub(1))?;
    let snippet = cm.span_to_snippet(span).ok()?;
    let width = snippet
        .lines()
        .next()
        .map(|first| first.chars().count())
        .unwrap_or(0)
        .max(1);

    let gutter = lo.line.to_string();
    let pad = " ".repeat(gutter.len());
    Some(format!(
        "{pad}--> {file}:{line_no}:{col}\n{pad} |\n{gutter} | {line}\n{pad} | {indent}{marker}",
        file = lo.file.name,
        line_no = lo.line,
        col = lo.col_display + 1,
        line = line.trim_end(),
        indent = " ".repeat(lo.col_display),
        marker = "^".repeat(width),
    ))
}
