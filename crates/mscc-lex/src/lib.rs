//! mscc-lex — turns MusicScript source text into a token stream.

mod cursor;
mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Tokenize `source`, returning a vector terminated by exactly one `Eof`
/// token, or the first lexical error encountered.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::tokenize(source)
}
