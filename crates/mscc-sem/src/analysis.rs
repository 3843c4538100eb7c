//! Scoped, single-pass type checker.
//!
//! Walks a parsed `Program` bottom-up, assigning each expression an `int` or
//! `note` type and validating every declaration, assignment, and builtin
//! call against it. Returns the program unchanged on success — this stage
//! exists to reject ill-typed programs, not to transform them.

use crate::error::SemanticError;
use crate::scope::ScopeStack;
use crate::types::Type;
use mscc_ast::{BinOp, Builtin, CompareOp, Expr, Program, Stmt, TypeKeyword};
use mscc_util::{Interner, Span};

pub struct Analyzer<'a> {
    interner: &'a Interner,
    scopes: ScopeStack,
}

impl<'a> Analyzer<'a> {
    pub fn new(interner: &'a Interner) -> Self {
        Self {
            interner,
            scopes: ScopeStack::new(),
        }
    }

    /// Check `program`, returning every statement's validated type
    /// information as a side effect of a clean `Ok(())`.
    pub fn analyze(program: &Program, interner: &Interner) -> Result<(), SemanticError> {
        let mut analyzer = Analyzer::new(interner);
        for stmt in &program.statements {
            analyzer.check_stmt(stmt)?;
        }
        Ok(())
    }

    fn name_of(&self, sym: mscc_util::Symbol) -> String {
        self.interner.resolve(sym).to_string()
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::VarDecl {
                ty, name, value, span,
            } => self.check_var_decl(*ty, *name, value, *span),
            Stmt::Assign { name, value, span } => self.check_assign(*name, value, *span),
            Stmt::Call { callee, args, span } => self.check_call(*callee, args, *span),
            Stmt::Repeat { times, body, span } => self.check_repeat(times, body, *span),
            Stmt::If {
                condition,
                then_block,
                else_block,
                span,
            } => self.check_if(condition, then_block, else_block.as_ref(), *span),
        }
    }

    fn check_var_decl(
        &mut self,
        ty: TypeKeyword,
        name: mscc_util::Symbol,
        value: &Expr,
        span: Span,
    ) -> Result<(), SemanticError> {
        let declared = match ty {
            TypeKeyword::Int => Type::Int,
            TypeKeyword::Note => Type::Note,
            TypeKeyword::String => {
                return Err(SemanticError::TypeMismatch {
                    line: span.line,
                    expected: "int or note".to_string(),
                    actual: "string".to_string(),
                });
            }
        };
        let value_ty = self.check_expr(value)?;
        if value_ty != declared {
            return Err(SemanticError::TypeMismatch {
                line: span.line,
                expected: declared.to_string(),
                actual: value_ty.to_string(),
            });
        }
        if !self.scopes.declare(name, declared) {
            return Err(SemanticError::Redeclaration {
                line: span.line,
                name: self.name_of(name),
            });
        }
        Ok(())
    }

    fn check_assign(
        &mut self,
        name: mscc_util::Symbol,
        value: &Expr,
        span: Span,
    ) -> Result<(), SemanticError> {
        let Some(declared) = self.scopes.lookup(name) else {
            return Err(SemanticError::UndeclaredVariable {
                line: span.line,
                name: self.name_of(name),
            });
        };
        let value_ty = self.check_expr(value)?;
        if value_ty != declared {
            return Err(SemanticError::TypeMismatch {
                line: span.line,
                expected: declared.to_string(),
                actual: value_ty.to_string(),
            });
        }
        Ok(())
    }

    fn check_call(
        &mut self,
        callee: Builtin,
        args: &[Expr],
        span: Span,
    ) -> Result<(), SemanticError> {
        let (name, expected_types): (&str, &[Type]) = match callee {
            Builtin::Play => ("play", &[Type::Note, Type::Int]),
            Builtin::Rest => ("rest", &[Type::Int]),
        };
        if args.len() != expected_types.len() {
            return Err(SemanticError::ArityMismatch {
                line: span.line,
                callee: name.to_string(),
                expected: expected_types.len(),
                found: args.len(),
            });
        }
        for (index, (arg, expected)) in args.iter().zip(expected_types).enumerate() {
            let actual = self.check_expr(arg)?;
            if actual != *expected {
                return Err(SemanticError::ArgTypeMismatch {
                    line: span.line,
                    callee: name.to_string(),
                    index,
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_repeat(
        &mut self,
        times: &Expr,
        body: &mscc_ast::Block,
        span: Span,
    ) -> Result<(), SemanticError> {
        let times_ty = self.check_expr(times)?;
        if times_ty != Type::Int {
            return Err(SemanticError::TypeMismatch {
                line: span.line,
                expected: Type::Int.to_string(),
                actual: times_ty.to_string(),
            });
        }
        self.scopes.push();
        let result = body.statements.iter().try_for_each(|s| self.check_stmt(s));
        self.scopes.pop();
        result
    }

    fn check_if(
        &mut self,
        condition: &Expr,
        then_block: &mscc_ast::Block,
        else_block: Option<&mscc_ast::Block>,
        _span: Span,
    ) -> Result<(), SemanticError> {
        self.check_expr(condition)?;

        self.scopes.push();
        let then_result = then_block.statements.iter().try_for_each(|s| self.check_stmt(s));
        self.scopes.pop();
        then_result?;

        if let Some(else_block) = else_block {
            self.scopes.push();
            let else_result = else_block.statements.iter().try_for_each(|s| self.check_stmt(s));
            self.scopes.pop();
            else_result?;
        }
        Ok(())
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<Type, SemanticError> {
        match expr {
            Expr::Number(_, _) => Ok(Type::Int),
            Expr::NoteLiteral(_, _) => Ok(Type::Note),
            Expr::Identifier(name, span) => self.scopes.lookup(*name).ok_or_else(|| {
                SemanticError::UndeclaredVariable {
                    line: span.line,
                    name: self.name_of(*name),
                }
            }),
            Expr::BinOp {
                left, op, right, span,
            } => self.check_binop(left, *op, right, *span),
            Expr::Compare {
                left, right, span, ..
            } => {
                // Operands are only walked for declaredness; the comparison
                // result is always int regardless of operand types.
                self.check_expr(left)?;
                self.check_expr(right)?;
                let _ = span;
                Ok(Type::Int)
            }
        }
    }

    fn check_binop(
        &mut self,
        left: &Expr,
        op: BinOp,
        right: &Expr,
        span: Span,
    ) -> Result<Type, SemanticError> {
        let left_ty = self.check_expr(left)?;
        let right_ty = self.check_expr(right)?;

        if matches!(op, BinOp::Add | BinOp::Sub) {
            match (left_ty, right_ty) {
                (Type::Int, Type::Int) => return Ok(Type::Int),
                (Type::Note, Type::Int) => return Ok(Type::Note),
                _ => {
                    return Err(SemanticError::TypeMismatch {
                        line: span.line,
                        expected: "int+int or note+int".to_string(),
                        actual: format!("{left_ty}+{right_ty}"),
                    });
                }
            }
        }

        match (left_ty, right_ty) {
            (Type::Int, Type::Int) => Ok(Type::Int),
            _ => Err(SemanticError::TypeMismatch {
                line: span.line,
                expected: "int and int".to_string(),
                actual: format!("{left_ty} and {right_ty}"),
            }),
        }
    }
}
