//! mscc-sem — scoped semantic analysis and int/note type checking.

mod analysis;
mod error;
mod scope;
mod types;

pub use analysis::Analyzer;
pub use error::SemanticError;
pub use scope::ScopeStack;
pub use types::Type;

use mscc_ast::Program;
use mscc_util::Interner;

/// Validate `program`, returning the unchanged program on success.
pub fn analyze(program: &Program, interner: &Interner) -> Result<(), SemanticError> {
    Analyzer::analyze(program, interner)
}
