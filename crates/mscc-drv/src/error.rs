//! Aggregated error type for the full pipeline.
//!
//! Each stage keeps its own precise `thiserror` enum; this type exists only
//! so `main` has one thing to match on and one way to render a diagnostic
//! line, regardless of which stage failed.

use mscc_util::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lex(#[from] mscc_lex::LexError),

    #[error(transparent)]
    Parse(#[from] mscc_ast::ParseError),

    #[error(transparent)]
    Semantic(#[from] mscc_sem::SemanticError),

    #[error(transparent)]
    Generate(#[from] mscc_ir::GeneratorError),

    #[error(transparent)]
    Optimize(#[from] mscc_ir::OptimizerError),
}

impl Diagnostic for CompileError {
    fn line(&self) -> u32 {
        match self {
            CompileError::Io(_) => 0,
            CompileError::Lex(e) => e.line(),
            CompileError::Parse(e) => e.line(),
            CompileError::Semantic(e) => e.line(),
            CompileError::Generate(e) => e.line(),
            CompileError::Optimize(e) => e.line(),
        }
    }

    fn message(&self) -> String {
        match self {
            CompileError::Io(e) => e.to_string(),
            CompileError::Lex(e) => e.message(),
            CompileError::Parse(e) => e.message(),
            CompileError::Semantic(e) => e.message(),
            CompileError::Generate(e) => e.message(),
            CompileError::Optimize(e) => e.message(),
        }
    }
}
