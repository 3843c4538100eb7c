//! Tokens → AST by LL(1) recursive descent, one token of lookahead.

use crate::ast::{BinOp, Block, Builtin, CompareOp, Expr, Program, Stmt, TypeKeyword};
use crate::error::ParseError;
use mscc_lex::{Token, TokenKind};
use mscc_util::Interner;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    interner: Interner,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            interner: Interner::new(),
        }
    }

    /// Parse the whole token stream into a `Program`, returning the interner
    /// that owns the text behind every `Symbol` in the tree.
    pub fn parse(tokens: Vec<Token>) -> Result<(Program, Interner), ParseError> {
        let mut parser = Parser::new(tokens);
        let program = parser.parse_program()?;
        Ok((program, parser.interner))
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Block { statements })
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current().kind {
            TokenKind::KwInt | TokenKind::KwNote | TokenKind::KwString => self.parse_decl(),
            TokenKind::KwRepeat => self.parse_repeat(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwPlay => self.parse_call(Builtin::Play),
            TokenKind::KwRest => self.parse_call(Builtin::Rest),
            TokenKind::Ident => self.parse_assign(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn parse_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        let ty = match self.current().kind {
            TokenKind::KwInt => TypeKeyword::Int,
            TokenKind::KwNote => TypeKeyword::Note,
            TokenKind::KwString => TypeKeyword::String,
            _ => unreachable!("parse_decl called on non-type-keyword token"),
        };
        self.advance();
        let name = self.expect_ident()?;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::VarDecl {
            ty,
            name,
            value,
            span: start,
        })
    }

    fn parse_assign(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Assign {
            name,
            value,
            span: start,
        })
    }

    fn parse_call(&mut self, callee: Builtin) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        self.advance();
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            args.push(self.parse_expr()?);
            while self.check(TokenKind::Comma) {
                self.advance();
                args.push(self.parse_expr()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Call {
            callee,
            args,
            span: start,
        })
    }

    fn parse_repeat(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        self.advance();
        self.expect(TokenKind::LParen)?;
        let times = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::Repeat {
            times,
            body,
            span: start,
        })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        self.advance();
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_boolexpr()?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.parse_block()?;
        let else_block = if self.check(TokenKind::KwElse) {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
            span: start,
        })
    }

    /// `boolexpr ::= expr ('>'|'<'|'==') expr` — comparisons appear only
    /// here, at the top of a parenthesized condition.
    fn parse_boolexpr(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_expr()?;
        let span = self.current().span;
        let op = match self.current().kind {
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::EqEq => CompareOp::Eq,
            _ => return Err(self.unexpected("'>', '<', or '=='")),
        };
        self.advance();
        let right = self.parse_expr()?;
        Ok(Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span,
        })
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let span = self.current().span;
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        loop {
            let span = self.current().span;
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value: i32 = token.lexeme.parse().map_err(|_| ParseError::UnexpectedToken {
                    line: token.span.line,
                    expected: "an integer literal in range".to_string(),
                    found: token.lexeme.clone(),
                })?;
                Ok(Expr::Number(value, token.span))
            }
            TokenKind::Ident => {
                self.advance();
                let sym = self.interner.intern(&token.lexeme);
                Ok(Expr::Identifier(sym, token.span))
            }
            TokenKind::NoteLit => {
                self.advance();
                let sym = self.interner.intern(&token.lexeme);
                Ok(Expr::NoteLiteral(sym, token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("a number, identifier, note literal, or '('")),
        }
    }

    fn expect_ident(&mut self) -> Result<mscc_util::Symbol, ParseError> {
        let token = self.current().clone();
        if token.kind != TokenKind::Ident {
            return Err(self.unexpected("an identifier"));
        }
        self.advance();
        Ok(self.interner.intern(&token.lexeme))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected_kind(kind))
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::UnexpectedToken {
            line: token.span.line,
            expected: expected.to_string(),
            found: token.lexeme.clone(),
        }
    }

    fn unexpected_kind(&self, expected: TokenKind) -> ParseError {
        self.unexpected(&format!("{:?}", expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mscc_lex::tokenize;

    fn parse_ok(source: &str) -> (Program, Interner) {
        let tokens = tokenize(source).expect("lex failed");
        Parser::parse(tokens).expect("parse failed")
    }

    #[test]
    fn parses_decl_and_play() {
        let (program, interner) = parse_ok("note n = A4; int d = 500; play(n, d);");
        assert_eq!(program.statements.len(), 3);
        match &program.statements[0] {
            Stmt::VarDecl { ty, name, .. } => {
                assert_eq!(*ty, TypeKeyword::Note);
                assert_eq!(interner.resolve(*name), "n");
            }
            other => panic!("expected VarDecl, got {other:?}"),
        }
        match &program.statements[2] {
            Stmt::Call { callee, args, .. } => {
                assert_eq!(*callee, Builtin::Play);
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn arithmetic_respects_precedence_and_left_associativity() {
        let (program, _) = parse_ok("int x = 2 + 3 * 4;");
        let Stmt::VarDecl { value, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        match value {
            Expr::BinOp { op: BinOp::Add, right, .. } => {
                assert!(matches!(**right, Expr::BinOp { op: BinOp::Mul, .. }));
            }
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn subtraction_chain_is_left_associative() {
        let (program, _) = parse_ok("int x = 10 - 2 - 3;");
        let Stmt::VarDecl { value, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        match value {
            Expr::BinOp { op: BinOp::Sub, left, .. } => {
                assert!(matches!(**left, Expr::BinOp { op: BinOp::Sub, .. }));
            }
            other => panic!("expected top-level Sub, got {other:?}"),
        }
    }

    #[test]
    fn repeat_lowers_to_repeat_stmt_with_block_body() {
        let (program, _) = parse_ok("repeat (3) { play(C4, 200); }");
        match &program.statements[0] {
            Stmt::Repeat { times, body, .. } => {
                assert!(matches!(times, Expr::Number(3, _)));
                assert_eq!(body.statements.len(), 1);
            }
            other => panic!("expected Repeat, got {other:?}"),
        }
    }

    #[test]
    fn if_else_parses_both_branches() {
        let (program, _) =
            parse_ok("int x = 5; if (x > 3) { play(A4, 100); } else { rest(100); }");
        match &program.statements[1] {
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                assert!(matches!(condition, Expr::Compare { op: CompareOp::Gt, .. }));
                assert_eq!(then_block.statements.len(), 1);
                assert!(else_block.is_some());
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let (program, _) = parse_ok("int x = (2 + 3) * 4;");
        let Stmt::VarDecl { value, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        match value {
            Expr::BinOp { op: BinOp::Mul, left, .. } => {
                assert!(matches!(**left, Expr::BinOp { op: BinOp::Add, .. }));
            }
            other => panic!("expected top-level Mul, got {other:?}"),
        }
    }

    #[test]
    fn assignment_to_undeclared_looking_ident_still_parses() {
        let (program, interner) = parse_ok("x = 1;");
        match &program.statements[0] {
            Stmt::Assign { name, .. } => assert_eq!(interner.resolve(*name), "x"),
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_token_reports_its_line() {
        let tokens = tokenize("int x = ;").unwrap();
        let err = Parser::parse(tokens).unwrap_err();
        match err {
            ParseError::UnexpectedToken { line, .. } => assert_eq!(line, 1),
        }
    }
}
