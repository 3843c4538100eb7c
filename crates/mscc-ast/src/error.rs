//! Parser error type.

use mscc_util::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken {
        line: u32,
        expected: String,
        found: String,
    },
}

impl Diagnostic for ParseError {
    fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { line, .. } => *line,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
