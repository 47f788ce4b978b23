//! Emulation of the C integer rules the portable operators replace.
//!
//! Operands go through the integer promotions and the usual arithmetic
//! conversions with an `int` of the configured width, so one expression
//! yields different values on 16-bit and 32-bit targets. Nothing is
//! checked. Unsigned arithmetic wraps, and operations C leaves undefined
//! are flagged on the outcome. Their value is then the wrapped two's
//! complement result where one exists, zero otherwise.
//!
//! Fixed-width types map onto C types by width: with a 16-bit `int`,
//! `i16` is `int` and `u16` is `unsigned int`.

use portint_core::{BinOp, IntType, OpKind, Operation, Output, ShiftOp, Value};

use super::native::NativeWidth;

/// Operations C leaves undefined.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, thiserror::Error, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedBehavior {
    #[error("signed integer overflow")]
    SignedOverflow,
    #[error("division by zero")]
    DivideByZero,
    /// Negative amount, or not below the width of the promoted operand.
    #[error("shift amount out of range")]
    ShiftOutOfRange,
    #[error("left shift of a negative value")]
    NegativeShift,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LegacyOutcome {
    pub output: Output,
    pub undefined: Option<UndefinedBehavior>,
}

impl LegacyOutcome {
    fn defined(output: Output) -> Self {
        Self {
            output,
            undefined: None,
        }
    }

    fn int(v: Value, undefined: Option<UndefinedBehavior>) -> Self {
        Self {
            output: Output::Int(v),
            undefined,
        }
    }
}

/// A C implementation with `int` of the given width.
#[derive(Clone, Copy, Debug)]
pub struct LegacyC {
    int: NativeWidth,
}

impl LegacyC {
    pub fn new(int: NativeWidth) -> Self {
        Self { int }
    }

    /// The `int` type of this implementation.
    pub fn int_type(&self) -> IntType {
        IntType::new(true, self.int.bit_width())
    }

    /// Integer promotion: anything narrower than `int` becomes `int`.
    pub fn promote(&self, ty: IntType) -> IntType {
        if ty.bits() < self.int.bits() {
            self.int_type()
        } else {
            ty
        }
    }

    /// Usual arithmetic conversions.
    pub fn common(&self, a: IntType, b: IntType) -> IntType {
        let (a, b) = (self.promote(a), self.promote(b));
        if a.is_signed() == b.is_signed() {
            return if a.bits() >= b.bits() { a } else { b };
        }
        let (signed, unsigned) = if a.is_signed() { (a, b) } else { (b, a) };
        if unsigned.bits() >= signed.bits() {
            unsigned
        } else {
            signed
        }
    }

    /// Replace the working type with the one C would use.
    pub fn retype(&self, op: Operation) -> Operation {
        let result_type = match (op.kind, op.rhs) {
            (OpKind::Binary(_) | OpKind::Compare(_), Some(rhs)) => {
                self.common(op.lhs.ty(), rhs.ty())
            }
            (OpKind::Shift(_), _) => self.promote(op.lhs.ty()),
            _ => op.result_type,
        };
        Operation { result_type, ..op }
    }

    pub fn eval(&self, op: &Operation) -> LegacyOutcome {
        let op = self.retype(*op);
        let ty = op.result_type;
        let rhs = op.rhs.unwrap_or_else(|| Value::zero(op.lhs.ty()));
        match op.kind {
            OpKind::Binary(bin) => binary(bin, cast(op.lhs, ty), cast(rhs, ty)),
            OpKind::Shift(shift) => shift_op(shift, cast(op.lhs, ty), rhs),
            OpKind::Convert(_) => LegacyOutcome::defined(Output::Int(cast(op.lhs, ty))),
            OpKind::Compare(cmp) => {
                let ord = cast(op.lhs, ty).get().cmp(&cast(rhs, ty).get());
                LegacyOutcome::defined(Output::Bool(cmp.holds(ord)))
            }
        }
    }
}

/// C conversion: modular for every target type.
pub(crate) fn cast(v: Value, ty: IntType) -> Value {
    Value::wrapping(ty, v.get())
}

/// Both operands already converted to the common type.
fn binary(op: BinOp, a: Value, b: Value) -> LegacyOutcome {
    let ty = a.ty();
    let (x, y) = (a.get(), b.get());

    if matches!(op, BinOp::Div | BinOp::Rem) && y == 0 {
        return LegacyOutcome::int(Value::zero(ty), Some(UndefinedBehavior::DivideByZero));
    }
    // `INT_MIN % -1` is undefined even though the remainder is representable.
    if op == BinOp::Rem && ty.is_signed() && x == ty.min() && y == -1 {
        return LegacyOutcome::int(Value::zero(ty), Some(UndefinedBehavior::SignedOverflow));
    }

    // Only an unsigned 64-bit product can leave i128, and only its low bits matter.
    let exact = match op {
        BinOp::Add => x + y,
        BinOp::Sub => x - y,
        BinOp::Mul => x.wrapping_mul(y),
        BinOp::Div => x / y,
        BinOp::Rem => x % y,
    };
    let undefined =
        (ty.is_signed() && !ty.contains(exact)).then_some(UndefinedBehavior::SignedOverflow);
    LegacyOutcome::int(Value::wrapping(ty, exact), undefined)
}

/// `lhs` already promoted. Right shift of a negative value is arithmetic.
fn shift_op(op: ShiftOp, lhs: Value, amount: Value) -> LegacyOutcome {
    let ty = lhs.ty();
    let n = amount.get();
    if !(0..ty.bits() as i128).contains(&n) {
        return LegacyOutcome::int(Value::zero(ty), Some(UndefinedBehavior::ShiftOutOfRange));
    }

    let x = lhs.get();
    let n = n as u32;
    match op {
        ShiftOp::Shr => LegacyOutcome::int(Value::wrapping(ty, x >> n), None),
        ShiftOp::Shl | ShiftOp::WrapShl => {
            let exact = x << n;
            let undefined = if !ty.is_signed() {
                None
            } else if x < 0 {
                Some(UndefinedBehavior::NegativeShift)
            } else if !ty.contains(exact) {
                Some(UndefinedBehavior::SignedOverflow)
            } else {
                None
            };
            LegacyOutcome::int(Value::wrapping(ty, exact), undefined)
        }
    }
}
