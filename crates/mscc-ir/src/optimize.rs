//! Peephole optimizer: constant folding then dead-jump elimination.
//!
//! Three passes over the quadruple list, run in sequence. Division
//! truncates toward zero, matching Rust's `/` on integers.

use crate::error::OptimizerError;
use crate::operand::Operand;
use crate::quad::{Op, Quad};
use std::collections::{HashMap, HashSet};

pub struct Optimizer;

impl Optimizer {
    pub fn optimize(quads: Vec<Quad>) -> Result<Vec<Quad>, OptimizerError> {
        let folded = Self::fold_constants(quads)?;
        let pruned = Self::drop_dead_temp_assigns(folded);
        Ok(Self::eliminate_dead_jumps(pruned))
    }

    /// Walks instructions in emission order, maintaining an environment of
    /// names known to hold a constant value. `=` and `jumpt` propagate a
    /// resolvable source operand into a literal (the former so a chain of
    /// foldable temps collapses onto its final destination; the latter so
    /// pass 3 can see a condition's statically-known truth value).
    /// Every other opcode's operands are left untouched — in particular
    /// `PARAM` must keep referring to a variable by name, not its value,
    /// since the emitted interpreter looks values up through the same
    /// environment at runtime.
    fn fold_constants(quads: Vec<Quad>) -> Result<Vec<Quad>, OptimizerError> {
        let mut env: HashMap<String, i64> = HashMap::new();
        let mut out = Vec::with_capacity(quads.len());

        for quad in quads {
            let result_name = quad.result.as_name().map(str::to_string);

            let folded = match quad.op {
                Op::Assign => {
                    let mut q = quad.clone();
                    if let Some(val) = Self::resolve(&quad.arg1, &env) {
                        if let Some(name) = &result_name {
                            env.insert(name.clone(), val);
                        }
                        q.arg1 = Operand::int(val);
                    } else if let Some(name) = &result_name {
                        env.remove(name);
                    }
                    q
                }
                Op::Add | Op::Sub | Op::Mul | Op::Div => {
                    let lhs = Self::resolve(&quad.arg1, &env);
                    let rhs = Self::resolve(&quad.arg2, &env);
                    match (lhs, rhs) {
                        (Some(a), Some(b)) => {
                            let computed = match quad.op {
                                Op::Add => a.wrapping_add(b),
                                Op::Sub => a.wrapping_sub(b),
                                Op::Mul => a.wrapping_mul(b),
                                Op::Div => {
                                    if b == 0 {
                                        return Err(OptimizerError::DivisionByZero { line: quad.line });
                                    }
                                    a / b
                                }
                                _ => unreachable!(),
                            };
                            if let Some(name) = &result_name {
                                env.insert(name.clone(), computed);
                            }
                            Quad::assign(
                                result_name.clone().unwrap_or_default(),
                                Operand::int(computed),
                                quad.line,
                            )
                        }
                        _ => {
                            if let Some(name) = &result_name {
                                env.remove(name);
                            }
                            quad
                        }
                    }
                }
                Op::Gt | Op::Lt | Op::Eq => {
                    let lhs = Self::resolve(&quad.arg1, &env);
                    let rhs = Self::resolve(&quad.arg2, &env);
                    match (lhs, rhs) {
                        (Some(a), Some(b)) => {
                            let truth = match quad.op {
                                Op::Gt => a > b,
                                Op::Lt => a < b,
                                Op::Eq => a == b,
                                _ => unreachable!(),
                            };
                            let computed = if truth { 1 } else { 0 };
                            if let Some(name) = &result_name {
                                env.insert(name.clone(), computed);
                            }
                            Quad::assign(
                                result_name.clone().unwrap_or_default(),
                                Operand::int(computed),
                                quad.line,
                            )
                        }
                        _ => {
                            if let Some(name) = &result_name {
                                env.remove(name);
                            }
                            quad
                        }
                    }
                }
                Op::JumpTrue => {
                    let mut q = quad.clone();
                    if let Some(val) = Self::resolve(&quad.arg1, &env) {
                        q.arg1 = Operand::int(val);
                    }
                    q
                }
                _ => {
                    if let Some(name) = &result_name {
                        env.remove(name);
                    }
                    quad
                }
            };
            out.push(folded);
        }
        Ok(out)
    }

    fn resolve(operand: &Operand, env: &HashMap<String, i64>) -> Option<i64> {
        match operand {
            Operand::IntLit(v) => Some(*v),
            Operand::Name(name) => env.get(name).copied(),
            _ => None,
        }
    }

    /// After folding, an `Assign` to a temp whose value was fully absorbed
    /// into every later reference (so the temp is never read as an
    /// operand anywhere) is dead. Folding already substitutes every
    /// resolvable read, so one pass suffices — no later instruction can
    /// still reference a temp through an intermediate name.
    fn drop_dead_temp_assigns(quads: Vec<Quad>) -> Vec<Quad> {
        let mut used: HashSet<String> = HashSet::new();
        for quad in &quads {
            for operand in [&quad.arg1, &quad.arg2] {
                if let Operand::Name(name) = operand {
                    used.insert(name.clone());
                }
            }
        }
        quads
            .into_iter()
            .filter(|quad| {
                if quad.op != Op::Assign {
                    return true;
                }
                match &quad.result {
                    Operand::Name(name) if is_temp(name) => used.contains(name),
                    _ => true,
                }
            })
            .collect()
    }

    fn eliminate_dead_jumps(quads: Vec<Quad>) -> Vec<Quad> {
        quads
            .into_iter()
            .filter_map(|quad| match quad.op {
                Op::JumpTrue => match quad.arg1.as_literal() {
                    Some(0) => None,
                    Some(_) => Some(Quad::jump(
                        quad.jump_target().expect("jumpt has a target").to_string(),
                        quad.line,
                    )),
                    None => Some(quad),
                },
                _ => Some(quad),
            })
            .collect()
    }
}

fn is_temp(name: &str) -> bool {
    name.strip_prefix('t')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(source: &str) -> Vec<Quad> {
        let tokens = mscc_lex::tokenize(source).expect("lex");
        let (program, interner) = mscc_ast::parse(tokens).expect("parse");
        crate::generator::Generator::generate(&program, &interner).expect("generate")
    }

    #[test]
    fn constant_arithmetic_folds_to_a_single_assign() {
        let quads = generate("int x = 2 + 3 * 4;");
        let optimized = Optimizer::optimize(quads).unwrap();
        assert_eq!(optimized.len(), 1);
        assert_eq!(optimized[0].arg1, Operand::int(14));
        assert_eq!(optimized[0].result, Operand::name("x"));
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let quads = generate("int x = 1 / 0;");
        let err = Optimizer::optimize(quads).unwrap_err();
        assert!(matches!(err, OptimizerError::DivisionByZero { .. }));
    }

    #[test]
    fn division_truncates_toward_zero() {
        let quads = generate("int a = 3 - 10; int x = a / 2; int y = 7 / 2;");
        let optimized = Optimizer::optimize(quads).unwrap();
        let values: Vec<i64> = optimized
            .iter()
            .filter(|q| q.op == Op::Assign)
            .filter_map(|q| q.arg1.as_literal())
            .collect();
        assert!(values.contains(&-3));
        assert!(values.contains(&3));
    }

    #[test]
    fn always_true_condition_leaves_only_an_unconditional_jump() {
        let quads = generate("if (1 < 2) { rest(1); }");
        let optimized = Optimizer::optimize(quads).unwrap();
        assert!(!optimized.iter().any(|q| q.op == Op::JumpTrue));
        assert!(optimized.iter().any(|q| q.op == Op::Jump));
    }

    #[test]
    fn param_keeps_referring_to_the_variable_by_name() {
        let quads = generate("note n = A4; int d = 500; play(n, d);");
        let optimized = Optimizer::optimize(quads).unwrap();
        let params: Vec<&Operand> = optimized
            .iter()
            .filter(|q| q.op == Op::Param)
            .map(|q| &q.arg1)
            .collect();
        assert_eq!(params, vec![&Operand::name("n"), &Operand::name("d")]);
    }

    #[test]
    fn optimize_is_idempotent() {
        let quads = generate("int x = 2 + 3; repeat (3) { play(C4, 1); } if (x > 1) { rest(1); }");
        let once = Optimizer::optimize(quads).unwrap();
        let twice = Optimizer::optimize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn reassignment_kills_the_prior_constant_binding() {
        let quads = generate("int x = 1; int y = x; x = 2 + 3; int z = x;");
        let optimized = Optimizer::optimize(quads).unwrap();
        let last_assign = optimized
            .iter()
            .rev()
            .find(|q| q.result.as_name() == Some("z"))
            .unwrap();
        assert_eq!(last_assign.arg1, Operand::int(5));
    }
}
