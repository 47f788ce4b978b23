//! Statically typed operator surface.
//!
//! One newtype per catalog entry. Which conversions exist is decided by the
//! type pair at compile time: lossless targets get `widen_to_*`, lossy ones get
//! `narrow_to_*` and `sat_to_*`, unsigned lossy ones also get `wrap_to_*`, and
//! shifts only exist on unsigned types. Runtime failures go through the
//! [`ErrorContext`]; hard faults panic at the caller's location.
//!
//! ```
//! use portint_core::{ErrorContext, U16, U32};
//!
//! let mut ctx = ErrorContext::capture();
//! let (a, b) = (U16::new(1000), U16::new(2000));
//! let r = a.widen_to_u32().mul(b.widen_to_u32(), &mut ctx).div(U32::new(1024), &mut ctx);
//! assert_eq!(r.wrap_to_u16().get(), 1953);
//! assert!(!ctx.has_error());
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::invariants::expect_ok;
use crate::{BinOp, ErrorContext, Fault, IntType, ShiftOp, Value, arith, convert, promote};

/// Common interface of the typed integers.
pub trait FixedInt: Copy {
    /// Underlying primitive.
    type Prim: Copy;

    const TYPE: IntType;

    fn value(self) -> Value;

    /// Rebuild from a value of type `Self::TYPE`.
    fn from_value(v: Value) -> Self;

    /// Mathematical comparison against any typed integer.
    fn compare<T: FixedInt>(self, other: T) -> Ordering {
        promote::compare(self.value(), other.value())
    }
}

macro_rules! fixed_int {
    ($($(#[$doc:meta])* $name:ident($prim:ty) = $ty:ident;)+) => {$(
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
        pub struct $name(pub $prim);

        impl $name {
            pub const MIN: Self = Self(<$prim>::MIN);
            pub const MAX: Self = Self(<$prim>::MAX);

            #[inline]
            pub const fn new(v: $prim) -> Self {
                Self(v)
            }

            #[inline]
            pub const fn get(self) -> $prim {
                self.0
            }

            #[track_caller]
            pub fn add(self, rhs: Self, ctx: &mut ErrorContext) -> Self {
                self.binary(BinOp::Add, rhs, ctx)
            }

            #[track_caller]
            pub fn sub(self, rhs: Self, ctx: &mut ErrorContext) -> Self {
                self.binary(BinOp::Sub, rhs, ctx)
            }

            #[track_caller]
            pub fn mul(self, rhs: Self, ctx: &mut ErrorContext) -> Self {
                self.binary(BinOp::Mul, rhs, ctx)
            }

            #[track_caller]
            pub fn div(self, rhs: Self, ctx: &mut ErrorContext) -> Self {
                self.binary(BinOp::Div, rhs, ctx)
            }

            /// Truncated remainder (`mod`).
            #[track_caller]
            pub fn rem(self, rhs: Self, ctx: &mut ErrorContext) -> Self {
                self.binary(BinOp::Rem, rhs, ctx)
            }

            #[track_caller]
            fn binary(self, op: BinOp, rhs: Self, ctx: &mut ErrorContext) -> Self {
                Self::from_value(expect_ok(arith::binary(op, self.value(), rhs.value(), ctx)))
            }
        }

        impl FixedInt for $name {
            type Prim = $prim;

            const TYPE: IntType = IntType::$ty;

            #[inline]
            fn value(self) -> Value {
                Value::wrapping(IntType::$ty, self.0 as i128)
            }

            #[inline]
            fn from_value(v: Value) -> Self {
                debug_assert_eq!(v.ty(), IntType::$ty);
                Self(v.bits() as $prim)
            }
        }

        impl From<$prim> for $name {
            fn from(v: $prim) -> Self {
                Self(v)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.0, IntType::$ty)
            }
        }
    )+};
}

macro_rules! unsigned_shifts {
    ($($name:ident),+) => {$(
        impl $name {
            /// Checked left shift: shifting out a 1 bit reports overflow.
            #[track_caller]
            pub fn shl(self, amount: u32, ctx: &mut ErrorContext) -> Self {
                self.shift(ShiftOp::Shl, amount, ctx)
            }

            #[track_caller]
            pub fn shr(self, amount: u32, ctx: &mut ErrorContext) -> Self {
                self.shift(ShiftOp::Shr, amount, ctx)
            }

            /// Left shift discarding overflowing bits; the amount is still checked.
            #[track_caller]
            pub fn wrap_shl(self, amount: u32, ctx: &mut ErrorContext) -> Self {
                self.shift(ShiftOp::WrapShl, amount, ctx)
            }

            #[track_caller]
            fn shift(self, op: ShiftOp, amount: u32, ctx: &mut ErrorContext) -> Self {
                let amount = Value::wrapping(IntType::U32, amount as i128);
                Self::from_value(expect_ok(arith::shift(op, self.value(), amount, ctx)))
            }
        }
    )+};
}

macro_rules! widening {
    ($src:ident => $($method:ident: $dst:ident),+ $(,)?) => {
        impl $src {
            $(
                #[inline]
                pub fn $method(self) -> $dst {
                    $dst(self.0.into())
                }
            )+
        }
    };
}

macro_rules! narrowing {
    ($src:ident => $($dst:ident: $narrow:ident, $sat:ident);+ $(;)?) => {
        impl $src {
            $(
                #[track_caller]
                pub fn $narrow(self, ctx: &mut ErrorContext) -> $dst {
                    $dst::from_value(expect_ok(convert::narrow(self.value(), $dst::TYPE, ctx)))
                }

                pub fn $sat(self) -> $dst {
                    $dst::from_value(convert::saturate(self.value(), $dst::TYPE))
                }
            )+
        }
    };
}

macro_rules! wrapping {
    ($src:ident => $($method:ident: $dst:ident),+ $(,)?) => {
        impl $src {
            $(
                #[track_caller]
                pub fn $method(self) -> $dst {
                    let v = convert::wrap(self.value(), $dst::TYPE).map_err(Fault::from);
                    $dst::from_value(expect_ok(v))
                }
            )+
        }
    };
}

macro_rules! reinterpreting {
    ($($a:ident <=> $b:ident: $a_to_b:ident, $b_to_a:ident;)+) => {$(
        impl $a {
            #[track_caller]
            pub fn $a_to_b(self) -> $b {
                let v = convert::reinterpret(self.value(), $b::TYPE).map_err(Fault::from);
                $b::from_value(expect_ok(v))
            }
        }

        impl $b {
            #[track_caller]
            pub fn $b_to_a(self) -> $a {
                let v = convert::reinterpret(self.value(), $a::TYPE).map_err(Fault::from);
                $a::from_value(expect_ok(v))
            }
        }
    )+};
}

fixed_int! {
    /// 8-bit unsigned integer.
    U8(u8) = U8;
    /// 16-bit unsigned integer.
    U16(u16) = U16;
    /// 32-bit unsigned integer.
    U32(u32) = U32;
    /// 64-bit unsigned integer.
    U64(u64) = U64;
    /// 8-bit signed integer.
    I8(i8) = I8;
    /// 16-bit signed integer.
    I16(i16) = I16;
    /// 32-bit signed integer.
    I32(i32) = I32;
    /// 64-bit signed integer.
    I64(i64) = I64;
}

unsigned_shifts!(U8, U16, U32, U64);

widening!(U8 => widen_to_u16: U16, widen_to_u32: U32, widen_to_u64: U64,
                widen_to_i16: I16, widen_to_i32: I32, widen_to_i64: I64);
widening!(U16 => widen_to_u32: U32, widen_to_u64: U64, widen_to_i32: I32, widen_to_i64: I64);
widening!(U32 => widen_to_u64: U64, widen_to_i64: I64);
widening!(I8 => widen_to_i16: I16, widen_to_i32: I32, widen_to_i64: I64);
widening!(I16 => widen_to_i32: I32, widen_to_i64: I64);
widening!(I32 => widen_to_i64: I64);

narrowing!(U8 => I8: narrow_to_i8, sat_to_i8);
narrowing!(U16 =>
    U8: narrow_to_u8, sat_to_u8;
    I8: narrow_to_i8, sat_to_i8;
    I16: narrow_to_i16, sat_to_i16;
);
narrowing!(U32 =>
    U8: narrow_to_u8, sat_to_u8;
    U16: narrow_to_u16, sat_to_u16;
    I8: narrow_to_i8, sat_to_i8;
    I16: narrow_to_i16, sat_to_i16;
    I32: narrow_to_i32, sat_to_i32;
);
narrowing!(U64 =>
    U8: narrow_to_u8, sat_to_u8;
    U16: narrow_to_u16, sat_to_u16;
    U32: narrow_to_u32, sat_to_u32;
    I8: narrow_to_i8, sat_to_i8;
    I16: narrow_to_i16, sat_to_i16;
    I32: narrow_to_i32, sat_to_i32;
    I64: narrow_to_i64, sat_to_i64;
);
narrowing!(I8 =>
    U8: narrow_to_u8, sat_to_u8;
    U16: narrow_to_u16, sat_to_u16;
    U32: narrow_to_u32, sat_to_u32;
    U64: narrow_to_u64, sat_to_u64;
);
narrowing!(I16 =>
    I8: narrow_to_i8, sat_to_i8;
    U8: narrow_to_u8, sat_to_u8;
    U16: narrow_to_u16, sat_to_u16;
    U32: narrow_to_u32, sat_to_u32;
    U64: narrow_to_u64, sat_to_u64;
);
narrowing!(I32 =>
    I8: narrow_to_i8, sat_to_i8;
    I16: narrow_to_i16, sat_to_i16;
    U8: narrow_to_u8, sat_to_u8;
    U16: narrow_to_u16, sat_to_u16;
    U32: narrow_to_u32, sat_to_u32;
    U64: narrow_to_u64, sat_to_u64;
);
narrowing!(I64 =>
    I8: narrow_to_i8, sat_to_i8;
    I16: narrow_to_i16, sat_to_i16;
    I32: narrow_to_i32, sat_to_i32;
    U8: narrow_to_u8, sat_to_u8;
    U16: narrow_to_u16, sat_to_u16;
    U32: narrow_to_u32, sat_to_u32;
    U64: narrow_to_u64, sat_to_u64;
);

wrapping!(U16 => wrap_to_u8: U8);
wrapping!(U32 => wrap_to_u8: U8, wrap_to_u16: U16);
wrapping!(U64 => wrap_to_u8: U8, wrap_to_u16: U16, wrap_to_u32: U32);
wrapping!(I8 => wrap_to_u8: U8, wrap_to_u16: U16, wrap_to_u32: U32, wrap_to_u64: U64);
wrapping!(I16 => wrap_to_u8: U8, wrap_to_u16: U16, wrap_to_u32: U32, wrap_to_u64: U64);
wrapping!(I32 => wrap_to_u8: U8, wrap_to_u16: U16, wrap_to_u32: U32, wrap_to_u64: U64);
wrapping!(I64 => wrap_to_u8: U8, wrap_to_u16: U16, wrap_to_u32: U32, wrap_to_u64: U64);

reinterpreting! {
    U8 <=> I8: reinterpret_as_i8, reinterpret_as_u8;
    U16 <=> I16: reinterpret_as_i16, reinterpret_as_u16;
    U32 <=> I32: reinterpret_as_i32, reinterpret_as_u32;
    U64 <=> I64: reinterpret_as_i64, reinterpret_as_u64;
}
