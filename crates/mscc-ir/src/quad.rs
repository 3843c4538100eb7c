//! Quadruple IR instruction.

use crate::operand::Operand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Gt,
    Lt,
    Eq,
    Param,
    Call,
    Label,
    JumpTrue,
    Jump,
}

/// A single four-field IR instruction: `(op, arg1, arg2, result)`. Any field
/// may be `Operand::None`. Carries the source line of the statement it was
/// lowered from, for diagnostics raised during optimization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quad {
    pub op: Op,
    pub arg1: Operand,
    pub arg2: Operand,
    pub result: Operand,
    pub line: u32,
}

impl Quad {
    pub fn new(op: Op, arg1: Operand, arg2: Operand, result: Operand, line: u32) -> Self {
        Self {
            op,
            arg1,
            arg2,
            result,
            line,
        }
    }

    pub fn assign(result: impl Into<String>, value: Operand, line: u32) -> Self {
        Self::new(Op::Assign, value, Operand::None, Operand::name(result), line)
    }

    pub fn label(name: impl Into<String>, line: u32) -> Self {
        Self::new(Op::Label, Operand::label(name), Operand::None, Operand::None, line)
    }

    pub fn jump(target: impl Into<String>, line: u32) -> Self {
        Self::new(Op::Jump, Operand::label(target), Operand::None, Operand::None, line)
    }

    pub fn jump_true(cond: Operand, target: impl Into<String>, line: u32) -> Self {
        Self::new(Op::JumpTrue, cond, Operand::label(target), Operand::None, line)
    }

    pub fn param(value: Operand, line: u32) -> Self {
        Self::new(Op::Param, value, Operand::None, Operand::None, line)
    }

    pub fn call(name: &str, arity: usize, line: u32) -> Self {
        Self::new(
            Op::Call,
            Operand::name(name),
            Operand::int(arity as i64),
            Operand::None,
            line,
        )
    }

    /// The label name this instruction jumps to, if it is a jump.
    pub fn jump_target(&self) -> Option<&str> {
        match self.op {
            Op::Jump => self.arg1.as_name_or_label(),
            Op::JumpTrue => self.arg2.as_name_or_label(),
            _ => None,
        }
    }

    /// The label name this instruction defines, if it is a `label`.
    pub fn label_name(&self) -> Option<&str> {
        match self.op {
            Op::Label => self.arg1.as_name_or_label(),
            _ => None,
        }
    }
}

impl Operand {
    fn as_name_or_label(&self) -> Option<&str> {
        match self {
            Operand::Name(n) | Operand::Label(n) => Some(n),
            _ => None,
        }
    }
}
