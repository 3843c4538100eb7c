//! Uniform diagnostic rendering across pipeline stages.
//!
//! Every stage keeps its own precise `thiserror` error enum (`LexError`,
//! `ParseError`, `SemanticError`, `GeneratorError`, `OptimizerError`). The
//! driver needs to turn whichever one failed into a single rendered line
//! without matching on each stage's concrete type — that's what this trait
//! is for.

/// Implemented by every stage's error type so the driver can format any
/// failure uniformly.
pub trait Diagnostic {
    /// Source line the error occurred on, or 0 if unknown.
    fn line(&self) -> u32;

    /// Human-readable message, without the `Error on line ...` prefix.
    fn message(&self) -> String;
}

/// Render a diagnostic as the single-line format the driver CLI writes to
/// standard output.
pub fn render<D: Diagnostic>(diag: &D) -> String {
    format!("Error on line {}: {}", diag.line(), diag.message())
}
