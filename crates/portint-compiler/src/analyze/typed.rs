//! Typed tree produced by the checker. Every literal has a concrete type and
//! every name is resolved to a local slot.

use portint_core::{BinOp, CmpOp, Conversion, IntType, LocalId, ShiftOp, Ty, Value};

use crate::diagnostics::Span;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checked {
    /// Slot names, indexed by `LocalId`. Shadowed names appear more than once.
    pub locals: Vec<String>,
    pub lets: Vec<TypedLet>,
    pub tail: Option<TypedExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedLet {
    pub local: LocalId,
    pub value: TypedExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedExpr {
    pub kind: TypedKind,
    pub ty: Ty,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedKind {
    Const(Value),
    Local(LocalId),
    Binary(BinOp, Box<TypedExpr>, Box<TypedExpr>),
    Shift(ShiftOp, Box<TypedExpr>, Box<TypedExpr>),
    Compare(CmpOp, Box<TypedExpr>, Box<TypedExpr>),
    Convert(Conversion, IntType, Box<TypedExpr>),
}

impl TypedExpr {
    pub fn int_type(&self) -> Option<IntType> {
        self.ty.as_int()
    }
}
