//! mscc-ast — AST data model and recursive-descent parser.

mod ast;
mod error;
mod parser;

pub use ast::{BinOp, Block, Builtin, CompareOp, Expr, Program, Stmt, TypeKeyword};
pub use error::ParseError;
pub use parser::Parser;

use mscc_util::Interner;

/// Parse a token stream into a `Program` and the interner owning its
/// identifier/note-name text.
pub fn parse(tokens: Vec<mscc_lex::Token>) -> Result<(Program, Interner), ParseError> {
    Parser::parse(tokens)
}
