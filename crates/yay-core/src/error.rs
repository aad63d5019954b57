//! Error type for YAY parsing.

use thiserror::Error;

/// A parse failure and the source position where it was detected.
///
/// `line` and `column` are 1-based. The `Display` rendering is the bare
/// message, or `"<message> at <line>:<column> of <filename>"` when the parse
/// was given a filename.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", location_suffix(.line, .column, .filename))]
pub struct ParseError {
    /// Human-readable cause of the first rejection.
    pub message: String,
    /// 1-based line number in the source document.
    pub line: usize,
    /// 1-based column number in the source document.
    pub column: usize,
    pub(crate) filename: Option<String>,
}

fn location_suffix(line: &usize, column: &usize, filename: &Option<String>) -> String {
    match filename {
        Some(name) => format!(" at {line}:{column} of <{name}>"),
        None => String::new(),
    }
}

impl ParseError {
    /// Build an error from an internal 0-based line/column pair.
    pub(crate) fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        ParseError {
            message: message.into(),
            line: line + 1,
            column: column + 1,
            filename: None,
        }
    }

    pub(crate) fn with_filename(mut self, filename: Option<&str>) -> Self {
        self.filename = filename.map(str::to_owned);
        self
    }
}

/// Convenience alias used throughout yay-core.
pub type Result<T> = std::result::Result<T, ParseError>;
