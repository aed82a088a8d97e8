//! Error types for reading screen sources

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid screen JSON at {span:?}: {message}")]
    Json { span: Span, message: String },

    #[error("screen file has a '#|' header but no $JSON section")]
    MissingJsonSection,
}

impl SourceError {
    /// Build a JSON error, locating serde_json's line/column inside `source`
    ///
    /// `base` is the offset of the JSON body within the whole file.
    pub(crate) fn from_json(err: serde_json::Error, body: &str, base: usize) -> Self {
        let start = base + offset_of(body, err.line(), err.column());
        let end = (start + 1).min(base + body.len()).max(start);
        SourceError::Json {
            span: start..end,
            message: err.to_string(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SourceError::Json { span, .. } => span.clone(),
            SourceError::MissingJsonSection => 0..0,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span();
        let message = self.to_string();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => message,
        }
    }
}

/// Byte offset of a 1-based line/column position
fn offset_of(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}
