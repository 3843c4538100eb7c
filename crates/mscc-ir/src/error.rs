//! IC generator and optimizer error types.

use mscc_util::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("unknown note literal '{name}'")]
    UnknownNote { line: u32, name: String },

    #[error("unsupported operator in lowering: {op}")]
    UnsupportedOperator { line: u32, op: String },
}

impl Diagnostic for GeneratorError {
    fn line(&self) -> u32 {
        match self {
            GeneratorError::UnknownNote { line, .. }
            | GeneratorError::UnsupportedOperator { line, .. } => *line,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    #[error("division by zero")]
    DivisionByZero { line: u32 },
}

impl Diagnostic for OptimizerError {
    fn line(&self) -> u32 {
        match self {
            OptimizerError::DivisionByZero { line } => *line,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
