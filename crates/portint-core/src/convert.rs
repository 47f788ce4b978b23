//! Conversion engine: widen, narrow, saturate, wrap and reinterpret.
//!
//! Only `narrow` can report a runtime error. Widen, wrap and reinterpret
//! have preconditions on the type pair; violating them is misuse, not data
//! loss.

use crate::{Conversion, ErrorContext, ErrorKind, Fault, IntType, Misuse, OpKind, Value};

/// Dispatch a conversion by kind.
pub fn apply(
    conv: Conversion,
    v: Value,
    to: IntType,
    ctx: &mut ErrorContext,
) -> Result<Value, Fault> {
    match conv {
        Conversion::Widen => Ok(widen(v, to)?),
        Conversion::Narrow => narrow(v, to, ctx),
        Conversion::Saturate => Ok(saturate(v, to)),
        Conversion::Wrap => Ok(wrap(v, to)?),
        Conversion::Reinterpret => Ok(reinterpret(v, to)?),
    }
}

/// Lossless conversion. `to` must represent every value of `v`'s type.
pub fn widen(v: Value, to: IntType) -> Result<Value, Misuse> {
    if !to.can_represent(v.ty()) {
        return Err(Misuse::NotWidening { from: v.ty(), to });
    }
    Ok(Value::wrapping(to, v.get()))
}

/// Range-checked conversion.
///
/// Out of range reports `TruncationDataLoss`; when execution continues the
/// result is the low-order bits, identical to what `wrap` would produce.
pub fn narrow(v: Value, to: IntType, ctx: &mut ErrorContext) -> Result<Value, Fault> {
    let n = v.get();
    if !to.contains(n) {
        ctx.report(
            ErrorKind::TruncationDataLoss,
            OpKind::Convert(Conversion::Narrow),
        )?;
    }
    Ok(Value::wrapping(to, n))
}

/// Clamp into the target range. Never fails.
pub fn saturate(v: Value, to: IntType) -> Value {
    let n = v.get().clamp(to.min(), to.max());
    Value::wrapping(to, n)
}

/// Modular conversion into an unsigned type.
pub fn wrap(v: Value, to: IntType) -> Result<Value, Misuse> {
    if to.is_signed() {
        return Err(Misuse::SignedWrapTarget(to));
    }
    Ok(Value::wrapping(to, v.get()))
}

/// Same-width bit pattern reinterpretation.
pub fn reinterpret(v: Value, to: IntType) -> Result<Value, Misuse> {
    if v.ty().bits() != to.bits() {
        return Err(Misuse::WidthMismatch { from: v.ty(), to });
    }
    Ok(Value::from_bits(to, v.bits()))
}

impl Value {
    pub fn widen_to(self, to: IntType) -> Result<Value, Misuse> {
        widen(self, to)
    }

    pub fn narrow_to(self, to: IntType, ctx: &mut ErrorContext) -> Result<Value, Fault> {
        narrow(self, to, ctx)
    }

    pub fn sat_to(self, to: IntType) -> Value {
        saturate(self, to)
    }

    pub fn wrap_to(self, to: IntType) -> Result<Value, Misuse> {
        wrap(self, to)
    }

    pub fn reinterpret_as(self, to: IntType) -> Result<Value, Misuse> {
        reinterpret(self, to)
    }
}
