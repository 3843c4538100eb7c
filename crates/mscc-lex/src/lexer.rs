//! Character stream → token stream.
//!
//! Recognition order matters: a note literal begins with an uppercase
//! letter and is followed by an octave digit, so it must be attempted
//! before the identifier rule runs — otherwise `A4` would lex as the
//! identifier `A` followed by the number `4`.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use mscc_util::Span;

pub struct Lexer {
    cursor: Cursor,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Lex the whole source, returning a token vector terminated by exactly
    /// one `Eof` token, or the first lexical error.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.cursor.advance();
                }
                Some('/') if self.cursor.peek_next() == Some('/') => {
                    while let Some(c) = self.cursor.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();
        let span = Span::new(self.cursor.line(), self.cursor.column());

        let Some(ch) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", span));
        };

        if ch == '=' && self.cursor.peek_next() == Some('=') {
            self.cursor.advance();
            self.cursor.eat('=');
            return Ok(Token::new(TokenKind::EqEq, "==", span));
        }

        if let Some(kind) = single_char_symbol(ch) {
            self.cursor.advance();
            return Ok(Token::new(kind, ch.to_string(), span));
        }

        if ('A'..='G').contains(&ch) {
            if let Some(lexeme) = self.try_lex_note() {
                return Ok(Token::new(TokenKind::NoteLit, lexeme, span));
            }
        }

        if ch.is_ascii_digit() {
            return Ok(Token::new(TokenKind::Number, self.lex_digits(), span));
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            let lexeme = self.lex_ident_text();
            let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Ident);
            return Ok(Token::new(kind, lexeme, span));
        }

        let line = self.cursor.line();
        self.cursor.advance();
        Err(LexError::UnexpectedCharacter { line, ch })
    }

    /// Attempt `[A-G](#|b)?[0-9]` at the cursor. Returns `None` (consuming
    /// nothing) if the lookahead doesn't complete the pattern, so the
    /// caller can fall through to identifier lexing (e.g. a bare `A`).
    fn try_lex_note(&mut self) -> Option<String> {
        let letter = self.cursor.peek()?;
        let mut offset = 1;
        let has_accidental = matches!(self.cursor.peek_at(offset), Some('#') | Some('b'));
        if has_accidental {
            offset += 1;
        }
        let digit = self.cursor.peek_at(offset)?;
        if !digit.is_ascii_digit() {
            return None;
        }

        let mut lexeme = String::new();
        lexeme.push(self.cursor.advance().unwrap());
        debug_assert_eq!(lexeme.chars().next(), Some(letter));
        if has_accidental {
            lexeme.push(self.cursor.advance().unwrap());
        }
        lexeme.push(self.cursor.advance().unwrap());
        Some(lexeme)
    }

    fn lex_digits(&mut self) -> String {
        let mut lexeme = String::new();
        while let Some(c) = self.cursor.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            lexeme.push(c);
            self.cursor.advance();
        }
        lexeme
    }

    fn lex_ident_text(&mut self) -> String {
        let mut lexeme = String::new();
        while let Some(c) = self.cursor.peek() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            lexeme.push(c);
            self.cursor.advance();
        }
        lexeme
    }
}

fn single_char_symbol(ch: char) -> Option<TokenKind> {
    Some(match ch {
        '=' => TokenKind::Eq,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '>' => TokenKind::Gt,
        '<' => TokenKind::Lt,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn ends_with_exactly_one_eof() {
        let tokens = Lexer::tokenize("int x = 1;").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn note_literal_not_split_into_ident_and_number() {
        let tokens = Lexer::tokenize("A4").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::NoteLit);
        assert_eq!(tokens[0].lexeme, "A4");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn enharmonic_spellings_both_lex_as_note_literals() {
        let sharp = Lexer::tokenize("C#4").unwrap();
        let flat = Lexer::tokenize("Db4").unwrap();
        assert_eq!(sharp[0].kind, TokenKind::NoteLit);
        assert_eq!(sharp[0].lexeme, "C#4");
        assert_eq!(flat[0].kind, TokenKind::NoteLit);
        assert_eq!(flat[0].lexeme, "Db4");
    }

    #[test]
    fn bare_letter_without_octave_is_an_identifier() {
        let tokens = Lexer::tokenize("A = 1;").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lexeme, "A");
    }

    #[test]
    fn keywords_recognized() {
        assert_eq!(
            kinds("int note string repeat if else play rest"),
            vec![
                TokenKind::KwInt,
                TokenKind::KwNote,
                TokenKind::KwString,
                TokenKind::KwRepeat,
                TokenKind::KwIf,
                TokenKind::KwElse,
                TokenKind::KwPlay,
                TokenKind::KwRest,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn eq_eq_recognized_before_eq() {
        assert_eq!(kinds("=="), vec![TokenKind::EqEq, TokenKind::Eof]);
        assert_eq!(kinds("="), vec![TokenKind::Eq, TokenKind::Eof]);
    }

    #[test]
    fn line_comment_consumed_up_to_newline() {
        let tokens = Lexer::tokenize("int x = 1; // play(x, 1);\nint y = 2;").unwrap();
        assert!(tokens.iter().all(|t| t.lexeme != "play"));
        assert_eq!(tokens.last().unwrap().span.line, 2);
    }

    #[test]
    fn newline_increments_line_and_resets_column() {
        let tokens = Lexer::tokenize("int x = 1;\nint y = 2;").unwrap();
        let second_int = tokens.iter().find(|t| t.span.line == 2).unwrap();
        assert_eq!(second_int.kind, TokenKind::KwInt);
        assert_eq!(second_int.span.column, 1);
    }

    #[test]
    fn unexpected_character_is_an_error_with_line() {
        let err = Lexer::tokenize("int x = 1 @ 2;").unwrap_err();
        match err {
            LexError::UnexpectedCharacter { line, ch } => {
                assert_eq!(line, 1);
                assert_eq!(ch, '@');
            }
        }
    }
}
