//! Type checking and name resolution.
//!
//! Applies the promotion rules statically so every instruction's result type
//! is known before execution, and rejects at compile time the operations
//! whose misuse would otherwise be a hard fault at run time: signed shifts,
//! wraps to signed types, non-widening `widen_to_*`, reinterpretation across
//! widths.
//!
//! Untyped literals take their type from context: the other operand of an
//! arithmetic or comparison operator, a `let` annotation, or `u32` for a
//! shift amount. A literal with no context is an error.

use indexmap::IndexMap;
use portint_core::{Conversion, IntType, LocalId, ShiftOp, Ty, Value, promote};

use super::typed::{Checked, TypedExpr, TypedKind, TypedLet};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::parser::ast::{Expr, ExprKind, Let, Name, Root};

/// Type of an untyped shift amount.
const SHIFT_AMOUNT_TYPE: IntType = IntType::U32;

#[derive(Debug, Clone, Copy)]
struct Binding {
    local: LocalId,
    /// `None` when the initializer failed to check; uses stay silent.
    ty: Option<Ty>,
}

pub struct Checker {
    scope: IndexMap<String, Binding>,
    checked: Checked,
    diagnostics: Diagnostics,
}

impl Checker {
    pub fn new() -> Self {
        Self {
            scope: IndexMap::new(),
            checked: Checked::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn check(mut self, root: &Root) -> (Checked, Diagnostics) {
        for stmt in &root.stmts {
            self.check_let(stmt);
        }
        if let Some(tail) = &root.tail {
            self.checked.tail = self.expr(tail, None);
        }
        (self.checked, self.diagnostics)
    }

    fn check_let(&mut self, stmt: &Let) {
        let declared = stmt.ty.map(|(ty, _)| ty);
        let mut value = self.expr(&stmt.value, declared);

        if let (Some(declared), Some(v)) = (declared, &value)
            && v.ty != Ty::Int(declared)
        {
            self.diagnostics
                .report(DiagnosticKind::TypeMismatch, v.span)
                .message(format!("expected {declared}, found {}", v.ty))
                .emit();
            value = None;
        }

        let ty = value.as_ref().map(|v| v.ty).or(declared.map(Ty::Int));
        let Some(local) = self.bind(&stmt.name, ty) else {
            return;
        };
        if let Some(value) = value {
            self.checked.lets.push(TypedLet { local, value });
        }
    }

    /// Allocate a fresh slot for `name`, shadowing any earlier binding.
    fn bind(&mut self, name: &Name, ty: Option<Ty>) -> Option<LocalId> {
        let Ok(local) = LocalId::try_from(self.checked.locals.len()) else {
            self.diagnostics
                .report(DiagnosticKind::TooManyLocals, name.span)
                .emit();
            return None;
        };
        self.checked.locals.push(name.text.clone());
        self.scope.insert(name.text.clone(), Binding { local, ty });
        Some(local)
    }

    fn expr(&mut self, expr: &Expr, hint: Option<IntType>) -> Option<TypedExpr> {
        match &expr.kind {
            ExprKind::Int { value, ty } => self.literal(*value, ty.or(hint), expr.span),
            ExprKind::Var(name) => self.var(name, expr.span),
            ExprKind::Binary(op, lhs, rhs) => {
                let (lhs, rhs) = self.operands(lhs, rhs, hint);
                let (lhs, rhs) = (self.int(lhs?)?, self.int(rhs?)?);
                let ty = promote::promote(lhs.1, rhs.1);
                let kind = TypedKind::Binary(*op, Box::new(lhs.0), Box::new(rhs.0));
                Some(typed(kind, Ty::Int(ty), expr.span))
            }
            ExprKind::Compare(op, lhs, rhs) => {
                let (lhs, rhs) = self.operands(lhs, rhs, None);
                let (lhs, rhs) = (self.int(lhs?)?, self.int(rhs?)?);
                let kind = TypedKind::Compare(*op, Box::new(lhs.0), Box::new(rhs.0));
                Some(typed(kind, Ty::Bool, expr.span))
            }
            ExprKind::Shift(op, lhs, amount) => self.shift(*op, lhs, amount, hint, expr.span),
            ExprKind::Call { func, args } => self.call(func, args, hint, expr.span),
        }
    }

    fn literal(&mut self, value: i128, ty: Option<IntType>, span: Span) -> Option<TypedExpr> {
        let Some(ty) = ty else {
            self.diagnostics
                .report(DiagnosticKind::UntypedLiteral, span)
                .emit();
            return None;
        };
        let Some(v) = Value::new(ty, value) else {
            self.diagnostics
                .report(DiagnosticKind::LiteralOutOfRange, span)
                .message(ty.name())
                .hint(format!("{ty} holds {}..={}", ty.min(), ty.max()))
                .emit();
            return None;
        };
        Some(typed(TypedKind::Const(v), Ty::Int(ty), span))
    }

    fn var(&mut self, name: &str, span: Span) -> Option<TypedExpr> {
        let Some(binding) = self.scope.get(name).copied() else {
            self.diagnostics
                .report(DiagnosticKind::UnknownName, span)
                .message(name)
                .emit();
            return None;
        };
        let ty = binding.ty?;
        Some(typed(TypedKind::Local(binding.local), ty, span))
    }

    /// Check both operands, typing an untyped literal on one side from the other.
    fn operands(
        &mut self,
        lhs: &Expr,
        rhs: &Expr,
        hint: Option<IntType>,
    ) -> (Option<TypedExpr>, Option<TypedExpr>) {
        if lhs.is_untyped_literal() && !rhs.is_untyped_literal() {
            let rhs = self.expr(rhs, hint);
            let context = rhs.as_ref().and_then(TypedExpr::int_type).or(hint);
            let lhs = self.expr(lhs, context);
            return (lhs, rhs);
        }
        let lhs = self.expr(lhs, hint);
        let context = lhs.as_ref().and_then(TypedExpr::int_type).or(hint);
        let rhs = self.expr(rhs, context);
        (lhs, rhs)
    }

    /// Require an integer operand.
    fn int(&mut self, expr: TypedExpr) -> Option<(TypedExpr, IntType)> {
        match expr.ty {
            Ty::Int(ty) => Some((expr, ty)),
            Ty::Bool => {
                self.diagnostics
                    .report(DiagnosticKind::BoolAsInteger, expr.span)
                    .emit();
                None
            }
        }
    }

    fn shift(
        &mut self,
        op: ShiftOp,
        lhs: &Expr,
        amount: &Expr,
        hint: Option<IntType>,
        span: Span,
    ) -> Option<TypedExpr> {
        let lhs = self.expr(lhs, hint);
        let amount = self.expr(amount, Some(SHIFT_AMOUNT_TYPE));
        let (lhs, ty) = self.int(lhs?)?;
        let (amount, _) = self.int(amount?)?;

        if ty.is_signed() {
            self.diagnostics
                .report(DiagnosticKind::SignedShift, lhs.span)
                .message(ty.name())
                .emit();
            return None;
        }

        let kind = TypedKind::Shift(op, Box::new(lhs), Box::new(amount));
        Some(typed(kind, Ty::Int(ty), span))
    }

    fn call(
        &mut self,
        func: &Name,
        args: &[Expr],
        hint: Option<IntType>,
        span: Span,
    ) -> Option<TypedExpr> {
        if func.text == "wrap_shl" {
            let [lhs, amount] = self.arity::<2>(func, args, span)?;
            return self.shift(ShiftOp::WrapShl, lhs, amount, hint, span);
        }

        let Some((conv, to)) = Conversion::parse_method(&func.text) else {
            self.diagnostics
                .report(DiagnosticKind::UnknownFunction, func.span)
                .message(func.text.as_str())
                .emit();
            return None;
        };

        let [arg] = self.arity::<1>(func, args, span)?;
        let arg = self.expr(arg, None)?;
        let (arg, from) = self.int(arg)?;
        self.check_conversion(conv, from, to, func.span)?;

        let kind = TypedKind::Convert(conv, to, Box::new(arg));
        Some(typed(kind, Ty::Int(to), span))
    }

    fn arity<'e, const N: usize>(
        &mut self,
        func: &Name,
        args: &'e [Expr],
        span: Span,
    ) -> Option<&'e [Expr; N]> {
        let Ok(args) = <&[Expr; N]>::try_from(args) else {
            self.diagnostics
                .report(DiagnosticKind::ArgumentCount, span)
                .message(format!("`{}` takes {N}, found {}", func.text, args.len()))
                .emit();
            return None;
        };
        Some(args)
    }

    /// Reject conversions whose type pair has no meaning.
    fn check_conversion(
        &mut self,
        conv: Conversion,
        from: IntType,
        to: IntType,
        span: Span,
    ) -> Option<()> {
        let pair = format!("{from} to {to}");
        let rejected = match conv {
            Conversion::Widen if !to.can_represent(from) => Some(DiagnosticKind::NotWidening),
            Conversion::Wrap if to.is_signed() => {
                self.diagnostics
                    .report(DiagnosticKind::SignedWrapTarget, span)
                    .message(to.name())
                    .emit();
                return None;
            }
            Conversion::Narrow | Conversion::Saturate | Conversion::Wrap
                if to.can_represent(from) =>
            {
                Some(DiagnosticKind::LosslessConversion)
            }
            Conversion::Reinterpret if from.bits() != to.bits() => {
                Some(DiagnosticKind::WidthMismatch)
            }
            _ => None,
        };

        match rejected {
            None => Some(()),
            Some(kind) => {
                let detail = if kind == DiagnosticKind::WidthMismatch {
                    format!("{from} as {to}")
                } else {
                    pair
                };
                self.diagnostics.report(kind, span).message(detail).emit();
                None
            }
        }
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

fn typed(kind: TypedKind, ty: Ty, span: Span) -> TypedExpr {
    TypedExpr { kind, ty, span }
}
