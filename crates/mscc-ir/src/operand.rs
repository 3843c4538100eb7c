//! IR operands.
//!
//! The source lowering is stringly typed — integer literals, identifiers,
//! labels, and "no operand" all share one string slot. A sum type instead,
//! with string forms reintroduced only at the emitter boundary.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    IntLit(i64),
    Name(String),
    Label(String),
}

impl Operand {
    pub fn int(value: i64) -> Self {
        Operand::IntLit(value)
    }

    pub fn name(name: impl Into<String>) -> Self {
        Operand::Name(name.into())
    }

    pub fn label(name: impl Into<String>) -> Self {
        Operand::Label(name.into())
    }

    /// The statically known integer value, if this operand is a literal.
    pub fn as_literal(&self) -> Option<i64> {
        match self {
            Operand::IntLit(v) => Some(*v),
            _ => None,
        }
    }

    /// The bound name, if this operand refers to a variable or temp.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Operand::Name(n) => Some(n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::None => write!(f, "_"),
            Operand::IntLit(v) => write!(f, "{v}"),
            Operand::Name(n) => write!(f, "{n}"),
            Operand::Label(l) => write!(f, "{l}"),
        }
    }
}
