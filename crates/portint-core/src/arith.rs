//! Arithmetic and shift evaluation with overflow and domain checks.
//!
//! Every operation is computed on exact `i128` values first and range-checked
//! against the working type afterwards, so the outcome never depends on the
//! host's native integer width. Fallback values when a failure is captured:
//! wrapped low-order bits for overflow, zero for division by zero and for
//! out-of-range shift amounts.

use crate::{
    BinOp, ErrorContext, ErrorKind, Fault, IntType, Misuse, OpKind, ShiftOp, Value, promote,
};

/// Evaluate `lhs op rhs` in the promoted working type.
pub fn binary(op: BinOp, lhs: Value, rhs: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
    let ty = promote::promote(lhs.ty(), rhs.ty());
    let kind = OpKind::Binary(op);
    let (a, b) = (lhs.get(), rhs.get());

    if matches!(op, BinOp::Div | BinOp::Rem) && b == 0 {
        ctx.report(ErrorKind::DivideByZero, kind)?;
        return Ok(Value::zero(ty));
    }

    let exact = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div => a.checked_div(b),
        BinOp::Rem => a.checked_rem(b),
    };

    match exact {
        Some(n) if ty.contains(n) => Ok(Value::wrapping(ty, n)),
        Some(n) => {
            ctx.report(range_error(ty, n), kind)?;
            Ok(Value::wrapping(ty, n))
        }
        // Only a product of two 64-bit magnitudes can leave i128.
        None => {
            let err = if (a < 0) == (b < 0) {
                ErrorKind::Overflow
            } else {
                ErrorKind::Underflow
            };
            ctx.report(err, kind)?;
            Ok(Value::wrapping(ty, a.wrapping_mul(b)))
        }
    }
}

/// Evaluate a shift of an unsigned `lhs` by `amount`.
pub fn shift(
    op: ShiftOp,
    lhs: Value,
    amount: Value,
    ctx: &mut ErrorContext,
) -> Result<Value, Fault> {
    let ty = lhs.ty();
    if ty.is_signed() {
        return Err(Misuse::SignedShift(ty).into());
    }

    let kind = OpKind::Shift(op);
    let Some(n) = shift_amount(ty, amount) else {
        ctx.report(ErrorKind::ShiftOutOfRange, kind)?;
        return Ok(Value::zero(ty));
    };

    let result = match op {
        ShiftOp::Shr => Value::from_bits(ty, lhs.bits() >> n),
        ShiftOp::WrapShl => Value::from_bits(ty, lhs.bits() << n),
        ShiftOp::Shl => {
            let exact = (lhs.bits() as u128) << n;
            if exact > ty.max() as u128 {
                ctx.report(ErrorKind::Overflow, kind)?;
            }
            Value::from_bits(ty, lhs.bits() << n)
        }
    };
    Ok(result)
}

/// Validated shift amount: `0 <= amount < bits(ty)`.
pub fn shift_amount(ty: IntType, amount: Value) -> Option<u32> {
    let n = amount.get();
    (0..ty.bits() as i128).contains(&n).then_some(n as u32)
}

fn range_error(ty: IntType, n: i128) -> ErrorKind {
    if n > ty.max() {
        ErrorKind::Overflow
    } else {
        ErrorKind::Underflow
    }
}

impl Value {
    pub fn add(self, rhs: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        binary(BinOp::Add, self, rhs, ctx)
    }

    pub fn sub(self, rhs: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        binary(BinOp::Sub, self, rhs, ctx)
    }

    pub fn mul(self, rhs: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        binary(BinOp::Mul, self, rhs, ctx)
    }

    pub fn div(self, rhs: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        binary(BinOp::Div, self, rhs, ctx)
    }

    pub fn rem(self, rhs: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        binary(BinOp::Rem, self, rhs, ctx)
    }

    pub fn shl(self, amount: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        shift(ShiftOp::Shl, self, amount, ctx)
    }

    pub fn shr(self, amount: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        shift(ShiftOp::Shr, self, amount, ctx)
    }

    pub fn wrap_shl(self, amount: Value, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        shift(ShiftOp::WrapShl, self, amount, ctx)
    }
}
