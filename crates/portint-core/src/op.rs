//! Operator kinds and transient operation descriptions.

use std::cmp::Ordering;
use std::fmt;

use crate::{ErrorContext, Fault, IntType, Value, arith, convert, promote};

/// Binary arithmetic operators. Operands are promoted to a common type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Truncated remainder, the `mod` operator.
    Rem,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

/// Shift operators. Left operand must be unsigned; result keeps its type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShiftOp {
    /// Checked left shift: shifting out a 1 bit is an overflow.
    Shl,
    Shr,
    /// Left shift discarding high bits silently.
    WrapShl,
}

impl ShiftOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::WrapShl => "wrap_shl",
        }
    }
}

/// Explicit conversion operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Conversion {
    Widen,
    Narrow,
    Saturate,
    Wrap,
    Reinterpret,
}

impl Conversion {
    pub const ALL: [Conversion; 5] = [
        Self::Widen,
        Self::Narrow,
        Self::Saturate,
        Self::Wrap,
        Self::Reinterpret,
    ];

    /// Method-name prefix, e.g. `widen_to` in `widen_to_u32`.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Widen => "widen_to",
            Self::Narrow => "narrow_to",
            Self::Saturate => "sat_to",
            Self::Wrap => "wrap_to",
            Self::Reinterpret => "reinterpret_as",
        }
    }

    /// Split a method name like `sat_to_u8` into conversion and target.
    pub fn parse_method(name: &str) -> Option<(Self, IntType)> {
        Self::ALL.into_iter().find_map(|conv| {
            let ty = name.strip_prefix(conv.prefix())?.strip_prefix('_')?;
            IntType::from_name(ty).map(|ty| (conv, ty))
        })
    }
}

/// Comparison operators. Always evaluated on mathematical values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }

    pub fn holds(self, ord: Ordering) -> bool {
        match self {
            Self::Lt => ord.is_lt(),
            Self::Le => ord.is_le(),
            Self::Gt => ord.is_gt(),
            Self::Ge => ord.is_ge(),
            Self::Eq => ord.is_eq(),
            Self::Ne => ord.is_ne(),
        }
    }
}

/// Kind of an operation, as seen by the error context and tracers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OpKind {
    Binary(BinOp),
    Shift(ShiftOp),
    Convert(Conversion),
    Compare(CmpOp),
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(op) => f.write_str(op.as_str()),
            Self::Shift(op) => f.write_str(op.as_str()),
            Self::Convert(conv) => f.write_str(conv.prefix()),
            Self::Compare(op) => f.write_str(op.as_str()),
        }
    }
}

/// Result of evaluating an operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Output {
    Int(Value),
    Bool(bool),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A single step of a lowered expression: operator, operands and the type
/// the result will have.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Operation {
    pub kind: OpKind,
    pub lhs: Value,
    /// Second operand for binary, shift and compare operations.
    pub rhs: Option<Value>,
    /// Working type for arithmetic, target type for conversions,
    /// left operand type for shifts and comparisons.
    pub result_type: IntType,
}

impl Operation {
    pub fn binary(op: BinOp, lhs: Value, rhs: Value) -> Self {
        Self {
            kind: OpKind::Binary(op),
            lhs,
            rhs: Some(rhs),
            result_type: promote::promote(lhs.ty(), rhs.ty()),
        }
    }

    pub fn shift(op: ShiftOp, lhs: Value, amount: Value) -> Self {
        Self {
            kind: OpKind::Shift(op),
            lhs,
            rhs: Some(amount),
            result_type: lhs.ty(),
        }
    }

    pub fn convert(conv: Conversion, v: Value, to: IntType) -> Self {
        Self {
            kind: OpKind::Convert(conv),
            lhs: v,
            rhs: None,
            result_type: to,
        }
    }

    pub fn compare(op: CmpOp, lhs: Value, rhs: Value) -> Self {
        Self {
            kind: OpKind::Compare(op),
            lhs,
            rhs: Some(rhs),
            result_type: promote::promote(lhs.ty(), rhs.ty()),
        }
    }

    /// Evaluate with the exact engine, reporting failures through `ctx`.
    pub fn eval(&self, ctx: &mut ErrorContext) -> Result<Output, Fault> {
        let rhs = || self.rhs.unwrap_or_else(|| Value::zero(self.lhs.ty()));
        let out = match self.kind {
            OpKind::Binary(op) => Output::Int(arith::binary(op, self.lhs, rhs(), ctx)?),
            OpKind::Shift(op) => Output::Int(arith::shift(op, self.lhs, rhs(), ctx)?),
            OpKind::Convert(conv) => {
                Output::Int(convert::apply(conv, self.lhs, self.result_type, ctx)?)
            }
            OpKind::Compare(op) => Output::Bool(op.holds(promote::compare(self.lhs, rhs()))),
        };
        Ok(out)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.rhs) {
            (OpKind::Convert(conv), _) => {
                write!(f, "{}_{}({})", conv.prefix(), self.result_type, self.lhs)
            }
            (OpKind::Shift(ShiftOp::WrapShl), Some(rhs)) => {
                write!(f, "wrap_shl({}, {})", self.lhs, rhs)
            }
            (kind, Some(rhs)) => write!(f, "{} {kind} {}", self.lhs, rhs),
            (kind, None) => write!(f, "{kind} {}", self.lhs),
        }
    }
}
