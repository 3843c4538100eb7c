//! Token data model.

use mscc_util::Span;

/// The closed set of token kinds MusicScript source text can lex to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    KwInt,
    KwNote,
    KwString,
    KwRepeat,
    KwIf,
    KwElse,
    KwPlay,
    KwRest,

    // Variable-lexeme categories
    Ident,
    Number,
    NoteLit,

    // Symbols
    Eq,
    EqEq,
    Plus,
    Minus,
    Star,
    Slash,
    Gt,
    Lt,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    Eof,
}

impl TokenKind {
    /// Map a bare identifier lexeme to its keyword kind, if it is one.
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        Some(match lexeme {
            "int" => TokenKind::KwInt,
            "note" => TokenKind::KwNote,
            "string" => TokenKind::KwString,
            "repeat" => TokenKind::KwRepeat,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "play" => TokenKind::KwPlay,
            "rest" => TokenKind::KwRest,
            _ => return None,
        })
    }
}

/// A single token: its kind, the original source text, and its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}
