//! Common working type for mixed-width and mixed-signedness operands.

use std::cmp::Ordering;

use crate::{IntType, Value};

/// Working type for a binary operation on `a` and `b`.
///
/// - Same signedness: the wider of the two.
/// - Mixed: the signed operand's type if it is strictly wider than the
///   unsigned one, otherwise the signed type one width step above the
///   unsigned operand. So `u16` with `i16` works in `i32`, never in `u16`.
/// - `u64` mixed with any signed type has no wider signed partner and works
///   in `i64`; values above `i64::MAX` then report overflow.
pub fn promote(a: IntType, b: IntType) -> IntType {
    if a.is_signed() == b.is_signed() {
        return if a.bits() >= b.bits() { a } else { b };
    }

    let (signed, unsigned) = if a.is_signed() { (a, b) } else { (b, a) };
    if signed.bits() > unsigned.bits() {
        return signed;
    }

    let width = unsigned.width().wider().unwrap_or(unsigned.width());
    IntType::new(true, width)
}

/// Compare two values of any types by their mathematical values.
#[inline]
pub fn compare(a: Value, b: Value) -> Ordering {
    a.get().cmp(&b.get())
}
