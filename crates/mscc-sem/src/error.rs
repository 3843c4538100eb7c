//! Semantic error type.

use mscc_util::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("undeclared variable '{name}'")]
    UndeclaredVariable { line: u32, name: String },

    #[error("'{name}' is already declared in this scope")]
    Redeclaration { line: u32, name: String },

    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        line: u32,
        expected: String,
        actual: String,
    },

    #[error("unknown type '{name}'")]
    UnknownType { line: u32, name: String },

    #[error("'{callee}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        line: u32,
        callee: String,
        expected: usize,
        found: usize,
    },

    #[error("argument {index} of '{callee}' expects {expected}, found {actual}")]
    ArgTypeMismatch {
        line: u32,
        callee: String,
        index: usize,
        expected: String,
        actual: String,
    },
}

impl Diagnostic for SemanticError {
    fn line(&self) -> u32 {
        match self {
            SemanticError::UndeclaredVariable { line, .. }
            | SemanticError::Redeclaration { line, .. }
            | SemanticError::TypeMismatch { line, .. }
            | SemanticError::UnknownType { line, .. }
            | SemanticError::ArityMismatch { line, .. }
            | SemanticError::ArgTypeMismatch { line, .. } => *line,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
