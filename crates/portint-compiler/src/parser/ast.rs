//! Untyped syntax tree.

use std::fmt::{self, Write};

use portint_core::{BinOp, CmpOp, IntType, ShiftOp};

use crate::diagnostics::Span;

/// A whole program: `let` statements followed by an optional result expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Root {
    pub stmts: Vec<Let>,
    pub tail: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Let {
    pub name: Name,
    /// Declared type and the span of its name.
    pub ty: Option<(IntType, Span)>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Edges on the longest path down to a leaf.
    height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// Integer literal, sign folded in. `ty` is set by a suffix (`5u8`) or
    /// a type-call (`u8(5)`).
    Int { value: i128, ty: Option<IntType> },
    Var(String),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Shift(ShiftOp, Box<Expr>, Box<Expr>),
    Compare(CmpOp, Box<Expr>, Box<Expr>),
    /// Function call. Method syntax `x.f(y)` is sugar for `f(x, y)`.
    Call { func: Name, args: Vec<Expr> },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        let height = match &kind {
            ExprKind::Int { .. } | ExprKind::Var(_) => 0,
            ExprKind::Binary(_, lhs, rhs)
            | ExprKind::Shift(_, lhs, rhs)
            | ExprKind::Compare(_, lhs, rhs) => lhs.height.max(rhs.height) + 1,
            ExprKind::Call { args, .. } => args.iter().map(|a| a.height).max().unwrap_or(0) + 1,
        };
        Self { kind, span, height }
    }

    /// Nesting depth of the tree. Every later pass recurses this deep.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Literal without a suffix, typed by its context.
    pub fn is_untyped_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Int { ty: None, .. })
    }
}

impl Root {
    /// S-expression listing for tests and debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for stmt in &self.stmts {
            let ty = stmt.ty.map_or_else(String::new, |(ty, _)| format!(": {ty}"));
            let _ = writeln!(out, "let {}{ty} = {}", stmt.name.text, stmt.value);
        }
        if let Some(tail) = &self.tail {
            let _ = writeln!(out, "{tail}");
        }
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Int { value, ty: Some(ty) } => write!(f, "{value}{ty}"),
            ExprKind::Int { value, ty: None } => write!(f, "{value}"),
            ExprKind::Var(name) => f.write_str(name),
            ExprKind::Binary(op, lhs, rhs) => write!(f, "({} {lhs} {rhs})", op.as_str()),
            ExprKind::Shift(op, lhs, rhs) => write!(f, "({} {lhs} {rhs})", op.as_str()),
            ExprKind::Compare(op, lhs, rhs) => write!(f, "({} {lhs} {rhs})", op.as_str()),
            ExprKind::Call { func, args } => {
                write!(f, "({}", func.text)?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_char(')')
            }
        }
    }
}
