//! Lexer error type.

use mscc_util::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}'")]
    UnexpectedCharacter { line: u32, ch: char },
}

impl Diagnostic for LexError {
    fn line(&self) -> u32 {
        match self {
            LexError::UnexpectedCharacter { line, .. } => *line,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
