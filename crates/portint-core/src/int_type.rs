//! Fixed-width integer type descriptors.
//!
//! One descriptor exists per (signedness, width) pair. Descriptors are plain
//! `Copy` values; bounds are computed, never stored.

use std::fmt;

/// Bit width of a fixed-width integer kind.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum BitWidth {
    W8 = 8,
    W16 = 16,
    W32 = 32,
    W64 = 64,
}

impl BitWidth {
    /// Convert from a raw bit count.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Mask selecting the low `bits()` bits of a `u64`.
    #[inline]
    pub const fn mask(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            w => (1u64 << w.bits()) - 1,
        }
    }

    /// The next wider width, if any.
    pub fn wider(self) -> Option<Self> {
        match self {
            Self::W8 => Some(Self::W16),
            Self::W16 => Some(Self::W32),
            Self::W32 => Some(Self::W64),
            Self::W64 => None,
        }
    }
}

/// Descriptor of a fixed-width integer type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntType {
    signed: bool,
    width: BitWidth,
}

impl IntType {
    pub const U8: Self = Self::new(false, BitWidth::W8);
    pub const U16: Self = Self::new(false, BitWidth::W16);
    pub const U32: Self = Self::new(false, BitWidth::W32);
    pub const U64: Self = Self::new(false, BitWidth::W64);
    pub const I8: Self = Self::new(true, BitWidth::W8);
    pub const I16: Self = Self::new(true, BitWidth::W16);
    pub const I32: Self = Self::new(true, BitWidth::W32);
    pub const I64: Self = Self::new(true, BitWidth::W64);

    /// The whole catalog, unsigned first, narrowest first.
    pub const ALL: [IntType; 8] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
    ];

    pub const fn new(signed: bool, width: BitWidth) -> Self {
        Self { signed, width }
    }

    /// Look up the descriptor for a raw bit count. `None` unless `bits` is 8, 16, 32 or 64.
    pub fn descriptor(signed: bool, bits: u32) -> Option<Self> {
        BitWidth::from_bits(bits).map(|width| Self::new(signed, width))
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    #[inline]
    pub const fn width(self) -> BitWidth {
        self.width
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.width.bits()
    }

    /// Smallest representable value.
    pub const fn min(self) -> i128 {
        if self.signed {
            -(1i128 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable value.
    pub const fn max(self) -> i128 {
        if self.signed {
            (1i128 << (self.bits() - 1)) - 1
        } else {
            (1i128 << self.bits()) - 1
        }
    }

    #[inline]
    pub const fn contains(self, v: i128) -> bool {
        self.min() <= v && v <= self.max()
    }

    /// Whether every value of `other` is representable in `self`.
    pub const fn can_represent(self, other: IntType) -> bool {
        self.min() <= other.min() && other.max() <= self.max()
    }

    pub const fn name(self) -> &'static str {
        match (self.signed, self.width) {
            (false, BitWidth::W8) => "u8",
            (false, BitWidth::W16) => "u16",
            (false, BitWidth::W32) => "u32",
            (false, BitWidth::W64) => "u64",
            (true, BitWidth::W8) => "i8",
            (true, BitWidth::W16) => "i16",
            (true, BitWidth::W32) => "i32",
            (true, BitWidth::W64) => "i64",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for IntType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for IntType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for IntType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown integer type `{name}`")))
    }
}
