//! Typed integer values.

use std::fmt;

use crate::IntType;

/// A raw bit pattern tagged with its type.
///
/// Bits above the type's width are always zero. Signed values are stored in
/// two's complement, so `bits()` of `-1i8` is `0xff`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Value {
    ty: IntType,
    bits: u64,
}

impl Value {
    /// Exact construction. `None` if `v` is outside the type's range.
    pub fn new(ty: IntType, v: i128) -> Option<Self> {
        ty.contains(v).then(|| Self::wrapping(ty, v))
    }

    /// Keep the low-order bits of `v` (two's complement truncation).
    #[inline]
    pub fn wrapping(ty: IntType, v: i128) -> Self {
        Self::from_bits(ty, v as u64)
    }

    /// Build from a raw bit pattern; bits above the width are discarded.
    #[inline]
    pub fn from_bits(ty: IntType, bits: u64) -> Self {
        Self {
            ty,
            bits: bits & ty.width().mask(),
        }
    }

    #[inline]
    pub fn zero(ty: IntType) -> Self {
        Self { ty, bits: 0 }
    }

    #[inline]
    pub fn ty(self) -> IntType {
        self.ty
    }

    #[inline]
    pub fn bits(self) -> u64 {
        self.bits
    }

    /// The mathematical value.
    pub fn get(self) -> i128 {
        if self.ty.is_signed() && self.sign_bit() {
            self.bits as i128 - (1i128 << self.ty.bits())
        } else {
            self.bits as i128
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// Whether the top bit of the width is set.
    #[inline]
    pub fn sign_bit(self) -> bool {
        (self.bits >> (self.ty.bits() - 1)) & 1 == 1
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.get(), self.ty)
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Value", 2)?;
        s.serialize_field("type", &self.ty)?;
        if self.ty.is_signed() {
            s.serialize_field("value", &(self.get() as i64))?;
        } else {
            s.serialize_field("value", &self.bits)?;
        }
        s.end()
    }
}
