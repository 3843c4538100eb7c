//! AST → quadruple lowering.
//!
//! Emission order is a deterministic left-to-right, depth-first walk of the
//! AST; temp and label numbering are tied to that order, so two runs over
//! the same program produce byte-identical IR.

use crate::error::GeneratorError;
use crate::notes::FrequencyTable;
use crate::operand::Operand;
use crate::quad::{Op, Quad};
use mscc_ast::{BinOp, Block, Builtin, CompareOp, Expr, Program, Stmt};
use mscc_util::Interner;

pub struct Generator {
    temp_counter: u32,
    label_counter: u32,
    notes: FrequencyTable,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            temp_counter: 0,
            label_counter: 0,
            notes: FrequencyTable::new(),
        }
    }

    /// Lower a validated program to its quadruple list.
    pub fn generate(program: &Program, interner: &Interner) -> Result<Vec<Quad>, GeneratorError> {
        let mut gen = Generator::new();
        let mut quads = Vec::new();
        for stmt in &program.statements {
            gen.lower_stmt(stmt, interner, &mut quads)?;
        }
        Ok(quads)
    }

    fn new_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("t{}", self.temp_counter)
    }

    fn new_label(&mut self) -> String {
        self.label_counter += 1;
        format!("L{}", self.label_counter)
    }

    fn lower_stmt(
        &mut self,
        stmt: &Stmt,
        interner: &Interner,
        quads: &mut Vec<Quad>,
    ) -> Result<(), GeneratorError> {
        match stmt {
            Stmt::VarDecl { name, value, span, .. } => {
                let place = self.lower_expr(value, interner, quads)?;
                quads.push(Quad::assign(interner.resolve(*name), place, span.line));
                Ok(())
            }
            Stmt::Assign { name, value, span } => {
                let place = self.lower_expr(value, interner, quads)?;
                quads.push(Quad::assign(interner.resolve(*name), place, span.line));
                Ok(())
            }
            Stmt::Call { callee, args, span } => self.lower_call(*callee, args, *span, interner, quads),
            Stmt::Repeat { times, body, span } => self.lower_repeat(times, body, *span, interner, quads),
            Stmt::If {
                condition,
                then_block,
                else_block,
                span,
            } => self.lower_if(condition, then_block, else_block.as_ref(), *span, interner, quads),
        }
    }

    fn lower_call(
        &mut self,
        callee: Builtin,
        args: &[Expr],
        span: mscc_util::Span,
        interner: &Interner,
        quads: &mut Vec<Quad>,
    ) -> Result<(), GeneratorError> {
        let mut places = Vec::with_capacity(args.len());
        for arg in args {
            places.push(self.lower_expr(arg, interner, quads)?);
        }
        for place in places {
            quads.push(Quad::param(place, span.line));
        }
        let name = match callee {
            Builtin::Play => "play",
            Builtin::Rest => "rest",
        };
        quads.push(Quad::call(name, args.len(), span.line));
        Ok(())
    }

    /// ```text
    /// c = 0
    /// label Lstart
    /// tc <- c < n
    /// jumpt tc Lbody
    /// jump Lend
    /// label Lbody
    /// <body>
    /// tn <- c + 1
    /// c <- tn
    /// jump Lstart
    /// label Lend
    /// ```
    fn lower_repeat(
        &mut self,
        times: &Expr,
        body: &Block,
        span: mscc_util::Span,
        interner: &Interner,
        quads: &mut Vec<Quad>,
    ) -> Result<(), GeneratorError> {
        let n_place = self.lower_expr(times, interner, quads)?;

        let counter = self.new_temp();
        quads.push(Quad::assign(&counter, Operand::int(0), span.line));

        let l_start = self.new_label();
        let l_body = self.new_label();
        let l_end = self.new_label();

        quads.push(Quad::label(&l_start, span.line));
        let cond_temp = self.new_temp();
        quads.push(Quad::new(
            Op::Lt,
            Operand::name(&counter),
            n_place,
            Operand::name(&cond_temp),
            span.line,
        ));
        quads.push(Quad::jump_true(Operand::name(&cond_temp), &l_body, span.line));
        quads.push(Quad::jump(&l_end, span.line));
        quads.push(Quad::label(&l_body, span.line));

        for stmt in &body.statements {
            self.lower_stmt(stmt, interner, quads)?;
        }

        let next_temp = self.new_temp();
        quads.push(Quad::new(
            Op::Add,
            Operand::name(&counter),
            Operand::int(1),
            Operand::name(&next_temp),
            span.line,
        ));
        quads.push(Quad::assign(&counter, Operand::name(&next_temp), span.line));
        quads.push(Quad::jump(&l_start, span.line));
        quads.push(Quad::label(&l_end, span.line));
        Ok(())
    }

    fn lower_if(
        &mut self,
        condition: &Expr,
        then_block: &Block,
        else_block: Option<&Block>,
        span: mscc_util::Span,
        interner: &Interner,
        quads: &mut Vec<Quad>,
    ) -> Result<(), GeneratorError> {
        let cond_place = self.lower_expr(condition, interner, quads)?;

        let l_then = self.new_label();
        let l_else = else_block.map(|_| self.new_label());
        let l_end = self.new_label();

        quads.push(Quad::jump_true(cond_place, &l_then, span.line));
        quads.push(Quad::jump(l_else.as_deref().unwrap_or(&l_end), span.line));

        quads.push(Quad::label(&l_then, span.line));
        for stmt in &then_block.statements {
            self.lower_stmt(stmt, interner, quads)?;
        }
        quads.push(Quad::jump(&l_end, span.line));

        if let Some(else_block) = else_block {
            quads.push(Quad::label(l_else.as_deref().expect("else label allocated"), span.line));
            for stmt in &else_block.statements {
                self.lower_stmt(stmt, interner, quads)?;
            }
            quads.push(Quad::jump(&l_end, span.line));
        }

        quads.push(Quad::label(&l_end, span.line));
        Ok(())
    }

    /// Lower `expr` to a place, emitting whatever quadruples its evaluation
    /// requires. Lowering an identifier emits nothing.
    fn lower_expr(
        &mut self,
        expr: &Expr,
        interner: &Interner,
        quads: &mut Vec<Quad>,
    ) -> Result<Operand, GeneratorError> {
        match expr {
            Expr::Number(value, _) => Ok(Operand::int(*value as i64)),
            Expr::Identifier(sym, _) => Ok(Operand::name(interner.resolve(*sym))),
            Expr::NoteLiteral(sym, span) => {
                let lexeme = interner.resolve(*sym);
                self.notes.lookup(lexeme).map(Operand::int).ok_or_else(|| {
                    GeneratorError::UnknownNote {
                        line: span.line,
                        name: lexeme.to_string(),
                    }
                })
            }
            Expr::BinOp { left, op, right, span } => {
                let lhs = self.lower_expr(left, interner, quads)?;
                let rhs = self.lower_expr(right, interner, quads)?;
                let ir_op = match op {
                    BinOp::Add => Op::Add,
                    BinOp::Sub => Op::Sub,
                    BinOp::Mul => Op::Mul,
                    BinOp::Div => Op::Div,
                };
                let temp = self.new_temp();
                quads.push(Quad::new(ir_op, lhs, rhs, Operand::name(&temp), span.line));
                Ok(Operand::name(temp))
            }
            Expr::Compare { left, op, right, span } => {
                let lhs = self.lower_expr(left, interner, quads)?;
                let rhs = self.lower_expr(right, interner, quads)?;
                let ir_op = match op {
                    CompareOp::Gt => Op::Gt,
                    CompareOp::Lt => Op::Lt,
                    CompareOp::Eq => Op::Eq,
                };
                let temp = self.new_temp();
                quads.push(Quad::new(ir_op, lhs, rhs, Operand::name(&temp), span.line));
                Ok(Operand::name(temp))
            }
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(source: &str) -> Vec<Quad> {
        let tokens = mscc_lex::tokenize(source).expect("lex");
        let (program, interner) = mscc_ast::parse(tokens).expect("parse");
        Generator::generate(&program, &interner).expect("generate")
    }

    #[test]
    fn decl_and_play_lowers_to_assign_param_call() {
        let quads = generate("note n = A4; int d = 500; play(n, d);");
        let ops: Vec<Op> = quads.iter().map(|q| q.op).collect();
        assert_eq!(
            ops,
            vec![Op::Assign, Op::Assign, Op::Param, Op::Param, Op::Call]
        );
        assert_eq!(quads[0].arg1, Operand::int(440));
        assert_eq!(quads[4].arg1, Operand::name("play"));
        assert_eq!(quads[4].arg2, Operand::int(2));
    }

    #[test]
    fn unknown_note_is_a_generator_error() {
        let tokens = mscc_lex::tokenize("note n = C9;").expect("lex");
        let (program, interner) = mscc_ast::parse(tokens).expect("parse");
        let err = Generator::generate(&program, &interner).unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownNote { .. }));
    }

    #[test]
    fn binop_allocates_a_temp_for_its_result() {
        let quads = generate("int x = 2 + 3;");
        assert!(matches!(quads[0].op, Op::Add));
        assert!(matches!(quads[1].op, Op::Assign));
    }

    #[test]
    fn repeat_contains_exactly_one_start_body_end_label_triple() {
        let quads = generate("repeat (3) { play(C4, 200); }");
        let labels: Vec<&str> = quads.iter().filter_map(|q| q.label_name()).collect();
        assert_eq!(labels.len(), 3);
        let calls = quads.iter().filter(|q| q.op == Op::Call).count();
        assert_eq!(calls, 1);
        let lt_count = quads.iter().filter(|q| q.op == Op::Lt).count();
        assert_eq!(lt_count, 1);
    }

    #[test]
    fn if_else_emits_exactly_one_jumpt_and_three_labels() {
        let quads = generate("int x = 5; if (x > 3) { play(A4, 100); } else { rest(100); }");
        let jumpt_count = quads.iter().filter(|q| q.op == Op::JumpTrue).count();
        assert_eq!(jumpt_count, 1);
        let labels = quads.iter().filter(|q| q.op == Op::Label).count();
        assert_eq!(labels, 3);
    }

    #[test]
    fn if_without_else_still_jumps_past_then_block() {
        let quads = generate("int x = 5; if (x > 3) { rest(1); }");
        let labels = quads.iter().filter(|q| q.op == Op::Label).count();
        assert_eq!(labels, 2);
    }

    #[test]
    fn temps_and_labels_are_strictly_increasing() {
        let quads = generate("int x = (1 + 2) * (3 + 4); repeat (2) { rest(x); }");
        let mut seen_temps = Vec::new();
        for q in &quads {
            for operand in [&q.arg1, &q.arg2, &q.result] {
                if let Operand::Name(n) = operand {
                    if let Some(rest) = n.strip_prefix('t') {
                        if let Ok(num) = rest.parse::<u32>() {
                            seen_temps.push(num);
                        }
                    }
                }
            }
        }
        let mut sorted = seen_temps.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), seen_temps.iter().collect::<std::collections::HashSet<_>>().len());
    }
}
